use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::MessageRole;

/// One side of an exchange, immutable once created. Ordering within a session
/// is by timestamp ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    id: Uuid,
    session_id: Uuid,
    role: MessageRole,
    content: String,
    timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(session_id: Uuid, role: MessageRole, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id,
            role,
            content,
            timestamp: Utc::now(),
        }
    }

    pub fn restore(
        id: Uuid,
        session_id: Uuid,
        role: MessageRole,
        content: String,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            session_id,
            role,
            content,
            timestamp,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn role(&self) -> MessageRole {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_creation() {
        let session_id = Uuid::new_v4();
        let message = ChatMessage::new(
            session_id,
            MessageRole::User,
            "What is the refund window?".to_string(),
        );

        assert_eq!(message.session_id(), session_id);
        assert_eq!(message.role(), MessageRole::User);
        assert_eq!(message.content(), "What is the refund window?");
    }
}
