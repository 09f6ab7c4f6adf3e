use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::PasswordDigest;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    id: Uuid,
    username: String,
    password_digest: PasswordDigest,
    created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: String, password: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            password_digest: PasswordDigest::from_password(password),
            created_at: Utc::now(),
        }
    }

    pub fn restore(
        id: Uuid,
        username: String,
        password_digest: PasswordDigest,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username,
            password_digest,
            created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password_digest(&self) -> &PasswordDigest {
        &self.password_digest
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn verify_password(&self, password: &str) -> bool {
        self.password_digest.verify(password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_verification() {
        let user = User::new("alice".to_string(), "correct horse");

        assert!(user.verify_password("correct horse"));
        assert!(!user.verify_password("battery staple"));
    }
}
