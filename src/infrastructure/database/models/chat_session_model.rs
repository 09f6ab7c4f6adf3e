use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::ChatSession as DomainChatSession;
use crate::infrastructure::database::schema::chat_sessions;

#[derive(Debug, Clone, Queryable, Selectable, Serialize, Identifiable)]
#[diesel(table_name = chat_sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ChatSessionModel {
    pub id: Uuid,
    pub project_id: Uuid,
    pub external_thread_id: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable, AsChangeset, Deserialize)]
#[diesel(table_name = chat_sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewChatSessionModel {
    pub id: Uuid,
    pub project_id: Uuid,
    pub external_thread_id: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&DomainChatSession> for NewChatSessionModel {
    fn from(session: &DomainChatSession) -> Self {
        Self {
            id: session.id(),
            project_id: session.project_id(),
            external_thread_id: session.external_thread_id().to_string(),
            name: session.name().map(|s| s.to_string()),
            created_at: session.created_at(),
        }
    }
}

impl From<ChatSessionModel> for DomainChatSession {
    fn from(model: ChatSessionModel) -> Self {
        DomainChatSession::restore(
            model.id,
            model.project_id,
            model.external_thread_id,
            model.name,
            model.created_at,
        )
    }
}
