use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Salted SHA-256 digest stored as `<salt>$<hex hash>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    pub fn new(stored: String) -> Result<Self, String> {
        let Some((salt, hash)) = stored.split_once('$') else {
            return Err("Digest must be in <salt>$<hash> form".to_string());
        };

        if salt.is_empty() || hash.len() != 64 || !hash.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err("Digest hash must be 64 hexadecimal characters".to_string());
        }

        Ok(Self(stored))
    }

    pub fn from_password(password: &str) -> Self {
        let salt = Uuid::new_v4().simple().to_string();
        Self(format!("{}${}", salt, Self::hash(&salt, password)))
    }

    pub fn verify(&self, password: &str) -> bool {
        match self.0.split_once('$') {
            Some((salt, hash)) => Self::hash(salt, password) == hash,
            None => false,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn hash(salt: &str, password: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(salt.as_bytes());
        hasher.update(password.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

impl From<PasswordDigest> for String {
    fn from(digest: PasswordDigest) -> Self {
        digest.0
    }
}
