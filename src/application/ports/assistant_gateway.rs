use async_trait::async_trait;
use std::path::Path;

use crate::domain::value_objects::MessageRole;

#[derive(Debug)]
pub enum AssistantGatewayError {
    NetworkError(String),
    ApiError { status: u16, message: String },
    ParseError(String),
    PollTimeout(String),
}

impl std::fmt::Display for AssistantGatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssistantGatewayError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            AssistantGatewayError::ApiError { status, message } => {
                write!(f, "Assistant API error ({}): {}", status, message)
            }
            AssistantGatewayError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            AssistantGatewayError::PollTimeout(msg) => write!(f, "Polling timed out: {}", msg),
        }
    }
}

impl std::error::Error for AssistantGatewayError {}

#[derive(Debug, Clone)]
pub struct CreateAssistantRequest {
    pub name: String,
    pub instructions: String,
    pub model: String,
    pub vector_store_id: String,
}

#[derive(Debug, Clone)]
pub struct Assistant {
    pub id: String,
    pub model: String,
    pub vector_store_ids: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct VectorStore {
    pub id: String,
}

#[derive(Debug, Clone)]
pub struct RemoteFile {
    pub id: String,
    pub filename: String,
}

/// Terminal and in-flight states of a vector-store indexing batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchStatus {
    InProgress,
    Completed,
    Failed,
    Cancelled,
}

impl BatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchStatus::InProgress => "in_progress",
            BatchStatus::Completed => "completed",
            BatchStatus::Failed => "failed",
            BatchStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, BatchStatus::InProgress)
    }
}

impl std::fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct IndexBatch {
    pub id: String,
    pub status: BatchStatus,
    pub last_error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RemoteThread {
    pub id: String,
}

#[derive(Debug, Clone)]
pub struct PostedMessage {
    pub id: String,
}

/// Run lifecycle: queued → in_progress → one of the terminal states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Queued,
    InProgress,
    Completed,
    RequiresAction,
    Failed,
    Cancelled,
    Expired,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Queued => "queued",
            RunStatus::InProgress => "in_progress",
            RunStatus::Completed => "completed",
            RunStatus::RequiresAction => "requires_action",
            RunStatus::Failed => "failed",
            RunStatus::Cancelled => "cancelled",
            RunStatus::Expired => "expired",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, RunStatus::Queued | RunStatus::InProgress)
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct RunError {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct Run {
    pub id: String,
    pub status: RunStatus,
    pub last_error: Option<RunError>,
}

/// A span of reply text that references an indexed file. Offsets index into
/// the owning segment's text and may be absent on older API payloads.
#[derive(Debug, Clone)]
pub struct Annotation {
    pub text: String,
    pub start_index: Option<usize>,
    pub end_index: Option<usize>,
    pub kind: AnnotationKind,
}

#[derive(Debug, Clone)]
pub enum AnnotationKind {
    FileCitation {
        file_id: String,
        quote: Option<String>,
    },
    FilePath {
        file_id: String,
    },
}

impl AnnotationKind {
    pub fn file_id(&self) -> &str {
        match self {
            AnnotationKind::FileCitation { file_id, .. } => file_id,
            AnnotationKind::FilePath { file_id } => file_id,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TextSegment {
    pub text: String,
    pub annotations: Vec<Annotation>,
}

#[derive(Debug, Clone)]
pub struct ThreadMessage {
    pub id: String,
    pub role: MessageRole,
    pub segments: Vec<TextSegment>,
}

/// Everything this backend consumes from the hosted assistant service. The
/// two polling operations (`index_file`, `run_to_completion`) only return once
/// the remote operation reached a terminal state or the client's poll wait
/// cap ran out.
#[async_trait]
pub trait AssistantGateway: Send + Sync {
    async fn create_assistant(
        &self,
        request: CreateAssistantRequest,
    ) -> Result<Assistant, AssistantGatewayError>;

    async fn retrieve_assistant(
        &self,
        assistant_id: &str,
    ) -> Result<Assistant, AssistantGatewayError>;

    async fn update_assistant_model(
        &self,
        assistant_id: &str,
        model: &str,
    ) -> Result<Assistant, AssistantGatewayError>;

    async fn update_assistant_vector_store(
        &self,
        assistant_id: &str,
        vector_store_id: &str,
    ) -> Result<Assistant, AssistantGatewayError>;

    async fn create_vector_store(&self, name: &str) -> Result<VectorStore, AssistantGatewayError>;

    async fn upload_file(
        &self,
        path: &Path,
        filename: &str,
    ) -> Result<RemoteFile, AssistantGatewayError>;

    async fn retrieve_file(&self, file_id: &str) -> Result<RemoteFile, AssistantGatewayError>;

    async fn delete_file(&self, file_id: &str) -> Result<(), AssistantGatewayError>;

    /// Submits the file to the vector store and polls the batch to a terminal
    /// state.
    async fn index_file(
        &self,
        vector_store_id: &str,
        file_id: &str,
    ) -> Result<IndexBatch, AssistantGatewayError>;

    async fn create_thread(&self) -> Result<RemoteThread, AssistantGatewayError>;

    async fn delete_thread(&self, thread_id: &str) -> Result<(), AssistantGatewayError>;

    async fn post_user_message(
        &self,
        thread_id: &str,
        content: &str,
    ) -> Result<PostedMessage, AssistantGatewayError>;

    /// Starts a run and polls it to a terminal state.
    async fn run_to_completion(
        &self,
        thread_id: &str,
        assistant_id: &str,
    ) -> Result<Run, AssistantGatewayError>;

    /// Thread messages created after the given message id, oldest first.
    async fn list_messages_after(
        &self,
        thread_id: &str,
        after_message_id: &str,
    ) -> Result<Vec<ThreadMessage>, AssistantGatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_terminal_states() {
        assert!(!RunStatus::Queued.is_terminal());
        assert!(!RunStatus::InProgress.is_terminal());
        assert!(RunStatus::Completed.is_terminal());
        assert!(RunStatus::RequiresAction.is_terminal());
        assert!(RunStatus::Failed.is_terminal());
        assert!(RunStatus::Cancelled.is_terminal());
        assert!(RunStatus::Expired.is_terminal());
    }

    #[test]
    fn test_batch_terminal_states() {
        assert!(!BatchStatus::InProgress.is_terminal());
        assert!(BatchStatus::Completed.is_terminal());
        assert!(BatchStatus::Failed.is_terminal());
        assert!(BatchStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_annotation_file_id() {
        let citation = AnnotationKind::FileCitation {
            file_id: "file-1".to_string(),
            quote: None,
        };
        let path = AnnotationKind::FilePath {
            file_id: "file-2".to_string(),
        };

        assert_eq!(citation.file_id(), "file-1");
        assert_eq!(path.file_id(), "file-2");
    }
}
