use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::ChatMessage as DomainChatMessage;
use crate::domain::value_objects::MessageRole;
use crate::infrastructure::database::schema::chat_messages;

#[derive(Debug, Clone, Queryable, Selectable, Serialize, Identifiable)]
#[diesel(table_name = chat_messages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ChatMessageModel {
    pub id: Uuid,
    pub session_id: Uuid,
    pub role: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Insertable, Deserialize)]
#[diesel(table_name = chat_messages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewChatMessageModel {
    pub id: Uuid,
    pub session_id: Uuid,
    pub role: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl From<&DomainChatMessage> for NewChatMessageModel {
    fn from(message: &DomainChatMessage) -> Self {
        Self {
            id: message.id(),
            session_id: message.session_id(),
            role: message.role().as_str().to_string(),
            content: message.content().to_string(),
            timestamp: message.timestamp(),
        }
    }
}

impl TryFrom<ChatMessageModel> for DomainChatMessage {
    type Error = String;

    fn try_from(model: ChatMessageModel) -> Result<Self, Self::Error> {
        let role = MessageRole::from_string(&model.role)
            .map_err(|e| format!("Invalid role on message {}: {}", model.id, e))?;

        Ok(DomainChatMessage::restore(
            model.id,
            model.session_id,
            role,
            model.content,
            model.timestamp,
        ))
    }
}
