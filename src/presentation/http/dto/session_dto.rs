use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::ChatSession;

#[derive(Debug, Deserialize, Default)]
pub struct CreateSessionDto {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSessionDto {
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SessionResponseDto {
    pub id: Uuid,
    pub project_id: Uuid,
    pub external_thread_id: String,
    pub name: Option<String>,
    pub created_at: String,
}

impl From<ChatSession> for SessionResponseDto {
    fn from(session: ChatSession) -> Self {
        Self {
            id: session.id(),
            project_id: session.project_id(),
            external_thread_id: session.external_thread_id().to_string(),
            name: session.name().map(|s| s.to_string()),
            created_at: session.created_at().to_rfc3339(),
        }
    }
}
