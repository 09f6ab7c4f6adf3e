use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A conversation correlated 1:1 with an external thread. Sessions are only
/// constructed once the remote thread exists, so the thread id is mandatory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSession {
    id: Uuid,
    project_id: Uuid,
    external_thread_id: String,
    name: Option<String>,
    created_at: DateTime<Utc>,
}

impl ChatSession {
    pub fn new(project_id: Uuid, external_thread_id: String, name: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            project_id,
            external_thread_id,
            name,
            created_at: Utc::now(),
        }
    }

    pub fn restore(
        id: Uuid,
        project_id: Uuid,
        external_thread_id: String,
        name: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            project_id,
            external_thread_id,
            name,
            created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn project_id(&self) -> Uuid {
        self.project_id
    }

    pub fn external_thread_id(&self) -> &str {
        &self.external_thread_id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn rename(&mut self, name: Option<String>) {
        self.name = name;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_creation() {
        let project_id = Uuid::new_v4();
        let session = ChatSession::new(project_id, "thread_abc".to_string(), None);

        assert_eq!(session.project_id(), project_id);
        assert_eq!(session.external_thread_id(), "thread_abc");
        assert!(session.name().is_none());
    }

    #[test]
    fn test_rename() {
        let mut session = ChatSession::new(Uuid::new_v4(), "thread_abc".to_string(), None);

        session.rename(Some("Refund questions".to_string()));
        assert_eq!(session.name(), Some("Refund questions"));

        session.rename(None);
        assert!(session.name().is_none());
    }
}
