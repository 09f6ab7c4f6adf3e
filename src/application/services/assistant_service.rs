use std::sync::Arc;

use crate::application::ports::assistant_gateway::{
    AssistantGateway, AssistantGatewayError, CreateAssistantRequest,
};
use crate::domain::entities::Project;
use crate::domain::repositories::ProjectRepository;

const ASSISTANT_INSTRUCTIONS: &str = "You are a helpful chatbot. Use the provided files \
associated with this project to answer questions accurately. When referencing information \
from a file, please indicate the source.";

#[derive(Debug)]
pub enum AssistantServiceError {
    MissingVectorStore,
    GatewayError(String),
    RepositoryError(String),
}

impl std::fmt::Display for AssistantServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssistantServiceError::MissingVectorStore => {
                write!(f, "Project must have a vector store before an assistant")
            }
            AssistantServiceError::GatewayError(msg) => write!(f, "Gateway error: {}", msg),
            AssistantServiceError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for AssistantServiceError {}

/// Hands out a ready-to-use assistant id for a project, reusing and repairing
/// the stored assistant when possible and creating a fresh one otherwise.
pub struct AssistantService {
    project_repository: Arc<dyn ProjectRepository>,
    gateway: Arc<dyn AssistantGateway>,
}

impl AssistantService {
    pub fn new(
        project_repository: Arc<dyn ProjectRepository>,
        gateway: Arc<dyn AssistantGateway>,
    ) -> Self {
        Self {
            project_repository,
            gateway,
        }
    }

    /// Mutates `project.assistant_id` at most once, when a new assistant is
    /// created; the reuse path keeps the stored id.
    pub async fn ensure_assistant(
        &self,
        project: &mut Project,
    ) -> Result<String, AssistantServiceError> {
        if let Some(assistant_id) = project.assistant_id() {
            match self.reuse_assistant(project, assistant_id).await {
                Ok(id) => return Ok(id),
                Err(err) => {
                    tracing::error!(
                        assistant_id,
                        error = %err,
                        "Failed to retrieve or update assistant, creating a new one"
                    );
                }
            }
        }

        let Some(vector_store_id) = project.vector_store_id() else {
            return Err(AssistantServiceError::MissingVectorStore);
        };

        let assistant = self
            .gateway
            .create_assistant(CreateAssistantRequest {
                name: format!("Assistant for Project {} - {}", project.id(), project.name()),
                instructions: ASSISTANT_INSTRUCTIONS.to_string(),
                model: project.model().as_str().to_string(),
                vector_store_id: vector_store_id.to_string(),
            })
            .await
            .map_err(|e| AssistantServiceError::GatewayError(e.to_string()))?;

        project
            .attach_assistant(assistant.id.clone())
            .map_err(|_| AssistantServiceError::MissingVectorStore)?;

        self.project_repository
            .update(project)
            .await
            .map_err(|e| AssistantServiceError::RepositoryError(e.to_string()))?;

        tracing::info!(
            project_id = %project.id(),
            assistant_id = %assistant.id,
            model = %project.model(),
            "Created new assistant for project"
        );

        Ok(assistant.id)
    }

    async fn reuse_assistant(
        &self,
        project: &Project,
        assistant_id: &str,
    ) -> Result<String, AssistantGatewayError> {
        let mut assistant = self.gateway.retrieve_assistant(assistant_id).await?;

        if assistant.model != project.model().as_str() {
            tracing::warn!(
                assistant_id,
                current = %assistant.model,
                wanted = %project.model(),
                "Assistant model differs from project setting, updating"
            );
            assistant = self
                .gateway
                .update_assistant_model(assistant_id, project.model().as_str())
                .await?;
        }

        if let Some(vector_store_id) = project.vector_store_id() {
            if !assistant.vector_store_ids.iter().any(|id| id == vector_store_id) {
                tracing::warn!(
                    assistant_id,
                    vector_store_id,
                    "Assistant not linked to project vector store, updating"
                );
                assistant = self
                    .gateway
                    .update_assistant_vector_store(assistant_id, vector_store_id)
                    .await?;
            }
        }

        Ok(assistant.id)
    }
}
