use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{AuthToken, User};

#[derive(Debug)]
pub enum AuthRepositoryError {
    DatabaseError(String),
    ValidationError(String),
}

impl std::fmt::Display for AuthRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            AuthRepositoryError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for AuthRepositoryError {}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn save(&self, user: &User) -> Result<(), AuthRepositoryError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthRepositoryError>;
}

#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Returns the user's existing token, issuing one on first login.
    async fn get_or_create(&self, user_id: Uuid) -> Result<AuthToken, AuthRepositoryError>;

    /// Resolves a presented bearer token to its owner.
    async fn find_user_by_token(&self, token: &str) -> Result<Option<User>, AuthRepositoryError>;

    async fn delete_for_user(&self, user_id: Uuid) -> Result<bool, AuthRepositoryError>;
}
