use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::ChatMessage;

#[derive(Debug)]
pub enum ChatMessageRepositoryError {
    DatabaseError(String),
    ValidationError(String),
}

impl std::fmt::Display for ChatMessageRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatMessageRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            ChatMessageRepositoryError::ValidationError(msg) => {
                write!(f, "Validation error: {}", msg)
            }
        }
    }
}

impl std::error::Error for ChatMessageRepositoryError {}

#[async_trait]
pub trait ChatMessageRepository: Send + Sync {
    async fn save(&self, message: &ChatMessage) -> Result<(), ChatMessageRepositoryError>;

    /// Conversation history, oldest first.
    async fn find_by_session(
        &self,
        session_id: Uuid,
    ) -> Result<Vec<ChatMessage>, ChatMessageRepositoryError>;
}
