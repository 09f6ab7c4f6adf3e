use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::assistant_gateway::AssistantGateway;
use crate::domain::repositories::chat_session_repository::{
    ChatSessionRepository, ChatSessionRepositoryError,
};

#[derive(Debug)]
pub enum DeleteSessionError {
    SessionNotFound(Uuid),
    RepositoryError(String),
}

impl std::fmt::Display for DeleteSessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeleteSessionError::SessionNotFound(id) => {
                write!(f, "Chat session not found: {}", id)
            }
            DeleteSessionError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for DeleteSessionError {}

impl From<ChatSessionRepositoryError> for DeleteSessionError {
    fn from(error: ChatSessionRepositoryError) -> Self {
        DeleteSessionError::RepositoryError(error.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct DeleteSessionRequest {
    pub project_id: Uuid,
    pub session_id: Uuid,
}

/// Remote thread deletion is best-effort; the local row (and its messages,
/// via the cascade) goes away regardless.
pub struct DeleteSessionUseCase {
    session_repository: Arc<dyn ChatSessionRepository>,
    gateway: Arc<dyn AssistantGateway>,
}

impl DeleteSessionUseCase {
    pub fn new(
        session_repository: Arc<dyn ChatSessionRepository>,
        gateway: Arc<dyn AssistantGateway>,
    ) -> Self {
        Self {
            session_repository,
            gateway,
        }
    }

    pub async fn execute(&self, request: DeleteSessionRequest) -> Result<(), DeleteSessionError> {
        let session = self
            .session_repository
            .find_in_project(request.project_id, request.session_id)
            .await?
            .ok_or(DeleteSessionError::SessionNotFound(request.session_id))?;

        match self.gateway.delete_thread(session.external_thread_id()).await {
            Ok(()) => {
                tracing::info!(thread_id = %session.external_thread_id(), "Deleted thread");
            }
            Err(err) => {
                tracing::error!(
                    thread_id = %session.external_thread_id(),
                    error = %err,
                    "Failed to delete thread"
                );
            }
        }

        self.session_repository.delete(session.id()).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{InMemoryChatSessionRepository, StubGateway};
    use crate::domain::entities::ChatSession;

    #[tokio::test]
    async fn test_deletes_thread_then_row() {
        let sessions = Arc::new(InMemoryChatSessionRepository::new());
        let gateway = Arc::new(StubGateway::new());
        let use_case = DeleteSessionUseCase::new(sessions.clone(), gateway.clone());

        let project_id = Uuid::new_v4();
        let session = ChatSession::new(project_id, "thread_9".to_string(), None);
        sessions.save(&session).await.unwrap();

        use_case
            .execute(DeleteSessionRequest {
                project_id,
                session_id: session.id(),
            })
            .await
            .unwrap();

        assert_eq!(gateway.deleted_threads(), vec!["thread_9".to_string()]);
        assert!(
            sessions
                .find_in_project(project_id, session.id())
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_row_deleted_even_when_thread_deletion_fails() {
        let sessions = Arc::new(InMemoryChatSessionRepository::new());
        let gateway = Arc::new(StubGateway::new());
        gateway.fail_next("delete_thread");
        let use_case = DeleteSessionUseCase::new(sessions.clone(), gateway);

        let project_id = Uuid::new_v4();
        let session = ChatSession::new(project_id, "thread_9".to_string(), None);
        sessions.save(&session).await.unwrap();

        use_case
            .execute(DeleteSessionRequest {
                project_id,
                session_id: session.id(),
            })
            .await
            .unwrap();

        assert!(
            sessions
                .find_in_project(project_id, session.id())
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_session_scoped_to_project() {
        let sessions = Arc::new(InMemoryChatSessionRepository::new());
        let gateway = Arc::new(StubGateway::new());
        let use_case = DeleteSessionUseCase::new(sessions.clone(), gateway.clone());

        let session = ChatSession::new(Uuid::new_v4(), "thread_9".to_string(), None);
        sessions.save(&session).await.unwrap();

        // Same session id, wrong project.
        let result = use_case
            .execute(DeleteSessionRequest {
                project_id: Uuid::new_v4(),
                session_id: session.id(),
            })
            .await;

        assert!(matches!(result, Err(DeleteSessionError::SessionNotFound(_))));
        assert!(gateway.deleted_threads().is_empty());
    }
}
