use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::assistant_gateway::{AssistantGateway, RunStatus};
use crate::application::services::assistant_service::{AssistantService, AssistantServiceError};
use crate::application::services::reply_builder::{self, PendingCitation};
use crate::domain::entities::{ChatMessage, ChatSession};
use crate::domain::repositories::chat_message_repository::{
    ChatMessageRepository, ChatMessageRepositoryError,
};
use crate::domain::repositories::chat_session_repository::{
    ChatSessionRepository, ChatSessionRepositoryError,
};
use crate::domain::repositories::project_repository::{ProjectRepository, ProjectRepositoryError};
use crate::domain::value_objects::{Citation, MessageRole};

const EMPTY_REPLY_FALLBACK: &str =
    "Assistant processed the request but did not generate a text response.";

#[derive(Debug)]
pub enum SendChatMessageError {
    ProjectNotFound(Uuid),
    SessionNotFound(Uuid),
    ValidationError(String),
    RunRequiresAction,
    RunFailed {
        status: String,
        code: Option<String>,
        message: Option<String>,
    },
    GatewayError(String),
    RepositoryError(String),
}

impl std::fmt::Display for SendChatMessageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SendChatMessageError::ProjectNotFound(id) => write!(f, "Project not found: {}", id),
            SendChatMessageError::SessionNotFound(id) => {
                write!(f, "Chat session not found: {}", id)
            }
            SendChatMessageError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            SendChatMessageError::RunRequiresAction => {
                write!(f, "Assistant run requires further action")
            }
            SendChatMessageError::RunFailed {
                status,
                code,
                message,
            } => {
                write!(f, "Assistant run failed: {}", status)?;
                if let Some(message) = message {
                    write!(f, " - {}", message)?;
                }
                if let Some(code) = code {
                    write!(f, " (Code: {})", code)?;
                }
                Ok(())
            }
            SendChatMessageError::GatewayError(msg) => write!(f, "Gateway error: {}", msg),
            SendChatMessageError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for SendChatMessageError {}

impl From<ProjectRepositoryError> for SendChatMessageError {
    fn from(error: ProjectRepositoryError) -> Self {
        SendChatMessageError::RepositoryError(error.to_string())
    }
}

impl From<ChatSessionRepositoryError> for SendChatMessageError {
    fn from(error: ChatSessionRepositoryError) -> Self {
        SendChatMessageError::RepositoryError(error.to_string())
    }
}

impl From<ChatMessageRepositoryError> for SendChatMessageError {
    fn from(error: ChatMessageRepositoryError) -> Self {
        SendChatMessageError::RepositoryError(error.to_string())
    }
}

impl From<AssistantServiceError> for SendChatMessageError {
    fn from(error: AssistantServiceError) -> Self {
        match error {
            AssistantServiceError::MissingVectorStore => {
                SendChatMessageError::ValidationError(error.to_string())
            }
            AssistantServiceError::GatewayError(msg) => SendChatMessageError::GatewayError(msg),
            AssistantServiceError::RepositoryError(msg) => {
                SendChatMessageError::RepositoryError(msg)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct SendChatMessageRequest {
    pub project_id: Uuid,
    pub session_id: Uuid,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct SendChatMessageResponse {
    pub reply: String,
    pub citations: Vec<Citation>,
}

/// One chat exchange: persist the user message, make sure the assistant is
/// current, post to the thread, run to a terminal state and assemble the
/// reply. The user message is never rolled back once stored.
pub struct SendChatMessageUseCase {
    project_repository: Arc<dyn ProjectRepository>,
    session_repository: Arc<dyn ChatSessionRepository>,
    message_repository: Arc<dyn ChatMessageRepository>,
    assistant_service: Arc<AssistantService>,
    gateway: Arc<dyn AssistantGateway>,
}

impl SendChatMessageUseCase {
    pub fn new(
        project_repository: Arc<dyn ProjectRepository>,
        session_repository: Arc<dyn ChatSessionRepository>,
        message_repository: Arc<dyn ChatMessageRepository>,
        assistant_service: Arc<AssistantService>,
        gateway: Arc<dyn AssistantGateway>,
    ) -> Self {
        Self {
            project_repository,
            session_repository,
            message_repository,
            assistant_service,
            gateway,
        }
    }

    pub async fn execute(
        &self,
        request: SendChatMessageRequest,
    ) -> Result<SendChatMessageResponse, SendChatMessageError> {
        if request.message.trim().is_empty() {
            return Err(SendChatMessageError::ValidationError(
                "No message provided".to_string(),
            ));
        }

        let mut project = self
            .project_repository
            .find_by_id(request.project_id)
            .await?
            .ok_or(SendChatMessageError::ProjectNotFound(request.project_id))?;

        let session = self
            .session_repository
            .find_in_project(request.project_id, request.session_id)
            .await?
            .ok_or(SendChatMessageError::SessionNotFound(request.session_id))?;

        if !project.has_vector_store() {
            return Err(SendChatMessageError::ValidationError(
                "Project has no associated knowledge base (Vector Store). Upload files first."
                    .to_string(),
            ));
        }

        // Stored first so the conversation history keeps the question even
        // when the remote call fails.
        self.message_repository
            .save(&ChatMessage::new(
                session.id(),
                MessageRole::User,
                request.message.clone(),
            ))
            .await?;

        tracing::info!(session_id = %session.id(), "Saved user message");

        let assistant_id = self.assistant_service.ensure_assistant(&mut project).await?;

        let posted = self
            .gateway
            .post_user_message(session.external_thread_id(), &request.message)
            .await
            .map_err(|e| SendChatMessageError::GatewayError(e.to_string()))?;

        let run = self
            .gateway
            .run_to_completion(session.external_thread_id(), &assistant_id)
            .await
            .map_err(|e| SendChatMessageError::GatewayError(e.to_string()))?;

        match run.status {
            RunStatus::Completed => self.assemble_response(&session, &posted.id).await,
            RunStatus::RequiresAction => {
                tracing::warn!(run_id = %run.id, "Run requires action, which is not implemented");
                Err(SendChatMessageError::RunRequiresAction)
            }
            status => {
                tracing::error!(
                    run_id = %run.id,
                    status = %status,
                    error = ?run.last_error,
                    "Assistant run failed or stopped"
                );
                Err(SendChatMessageError::RunFailed {
                    status: status.to_string(),
                    code: run.last_error.as_ref().map(|e| e.code.clone()),
                    message: run.last_error.as_ref().map(|e| e.message.clone()),
                })
            }
        }
    }

    async fn assemble_response(
        &self,
        session: &ChatSession,
        after_message_id: &str,
    ) -> Result<SendChatMessageResponse, SendChatMessageError> {
        let messages = self
            .gateway
            .list_messages_after(session.external_thread_id(), after_message_id)
            .await
            .map_err(|e| SendChatMessageError::GatewayError(e.to_string()))?;

        let (reply, pending) = reply_builder::assemble_reply(&messages);

        if reply.is_empty() {
            tracing::warn!(
                session_id = %session.id(),
                "Run completed but no assistant message content found"
            );
            return Ok(SendChatMessageResponse {
                reply: EMPTY_REPLY_FALLBACK.to_string(),
                citations: Vec::new(),
            });
        }

        let citations = self.resolve_citations(pending).await;

        self.message_repository
            .save(&ChatMessage::new(
                session.id(),
                MessageRole::Assistant,
                reply.clone(),
            ))
            .await?;

        tracing::info!(session_id = %session.id(), "Saved assistant message");

        Ok(SendChatMessageResponse { reply, citations })
    }

    /// Resolves each cited file id to its filename. A failed lookup drops
    /// that entry and leaves the rest intact.
    async fn resolve_citations(&self, pending: Vec<PendingCitation>) -> Vec<Citation> {
        let mut citations = Vec::with_capacity(pending.len());

        for entry in pending {
            match self.gateway.retrieve_file(&entry.file_id).await {
                Ok(remote) => {
                    let citation = if entry.path_citation {
                        Citation::path(entry.marker, remote.id, remote.filename)
                    } else {
                        Citation {
                            marker: entry.marker,
                            file_id: remote.id,
                            filename: remote.filename,
                            quote: entry.quote,
                            path_citation: false,
                        }
                    };
                    tracing::info!(
                        marker = %citation.marker,
                        filename = %citation.filename,
                        "Resolved citation"
                    );
                    citations.push(citation);
                }
                Err(err) => {
                    tracing::error!(
                        file_id = %entry.file_id,
                        error = %err,
                        "Error retrieving cited file"
                    );
                }
            }
        }

        citations
    }
}
