use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::ChatSession;

#[derive(Debug)]
pub enum ChatSessionRepositoryError {
    NotFound(Uuid),
    DatabaseError(String),
    ValidationError(String),
}

impl std::fmt::Display for ChatSessionRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatSessionRepositoryError::NotFound(id) => {
                write!(f, "Chat session not found: {}", id)
            }
            ChatSessionRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            ChatSessionRepositoryError::ValidationError(msg) => {
                write!(f, "Validation error: {}", msg)
            }
        }
    }
}

impl std::error::Error for ChatSessionRepositoryError {}

#[async_trait]
pub trait ChatSessionRepository: Send + Sync {
    async fn save(&self, session: &ChatSession) -> Result<(), ChatSessionRepositoryError>;

    async fn find_by_project(
        &self,
        project_id: Uuid,
    ) -> Result<Vec<ChatSession>, ChatSessionRepositoryError>;

    /// Scoped lookup: the session must belong to the given project.
    async fn find_in_project(
        &self,
        project_id: Uuid,
        session_id: Uuid,
    ) -> Result<Option<ChatSession>, ChatSessionRepositoryError>;

    async fn update(&self, session: &ChatSession) -> Result<(), ChatSessionRepositoryError>;

    /// Deletes the row; messages go with it via the cascade.
    async fn delete(&self, id: Uuid) -> Result<bool, ChatSessionRepositoryError>;
}
