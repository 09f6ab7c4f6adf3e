use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::assistant_gateway::AssistantGateway;
use crate::domain::entities::ChatSession;
use crate::domain::repositories::chat_session_repository::{
    ChatSessionRepository, ChatSessionRepositoryError,
};
use crate::domain::repositories::project_repository::{ProjectRepository, ProjectRepositoryError};

#[derive(Debug)]
pub enum CreateSessionError {
    ProjectNotFound(Uuid),
    ThreadCreationFailed(String),
    RepositoryError(String),
}

impl std::fmt::Display for CreateSessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CreateSessionError::ProjectNotFound(id) => write!(f, "Project not found: {}", id),
            CreateSessionError::ThreadCreationFailed(msg) => {
                write!(f, "Failed to initialize chat session: {}", msg)
            }
            CreateSessionError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for CreateSessionError {}

impl From<ProjectRepositoryError> for CreateSessionError {
    fn from(error: ProjectRepositoryError) -> Self {
        CreateSessionError::RepositoryError(error.to_string())
    }
}

impl From<ChatSessionRepositoryError> for CreateSessionError {
    fn from(error: ChatSessionRepositoryError) -> Self {
        CreateSessionError::RepositoryError(error.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct CreateSessionRequest {
    pub project_id: Uuid,
    pub name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateSessionResponse {
    pub session: ChatSession,
}

/// The remote thread is allocated first; the local row only exists when the
/// thread does, so a session is never left without a conversation behind it.
pub struct CreateSessionUseCase {
    project_repository: Arc<dyn ProjectRepository>,
    session_repository: Arc<dyn ChatSessionRepository>,
    gateway: Arc<dyn AssistantGateway>,
}

impl CreateSessionUseCase {
    pub fn new(
        project_repository: Arc<dyn ProjectRepository>,
        session_repository: Arc<dyn ChatSessionRepository>,
        gateway: Arc<dyn AssistantGateway>,
    ) -> Self {
        Self {
            project_repository,
            session_repository,
            gateway,
        }
    }

    pub async fn execute(
        &self,
        request: CreateSessionRequest,
    ) -> Result<CreateSessionResponse, CreateSessionError> {
        let project = self
            .project_repository
            .find_by_id(request.project_id)
            .await?
            .ok_or(CreateSessionError::ProjectNotFound(request.project_id))?;

        let thread = self.gateway.create_thread().await.map_err(|e| {
            tracing::error!(project_id = %project.id(), error = %e, "Failed to create thread");
            CreateSessionError::ThreadCreationFailed(e.to_string())
        })?;

        tracing::info!(
            project_id = %project.id(),
            thread_id = %thread.id,
            "Created thread for new chat session"
        );

        let session = ChatSession::new(project.id(), thread.id, request.name);
        self.session_repository.save(&session).await?;

        Ok(CreateSessionResponse { session })
    }
}
