use async_trait::async_trait;
use reqwest::{Client, Error as ReqwestError, Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::env;
use std::path::Path;
use std::time::{Duration, Instant};

use crate::application::ports::assistant_gateway::{
    Annotation, AnnotationKind, Assistant, AssistantGateway, AssistantGatewayError, BatchStatus,
    CreateAssistantRequest, IndexBatch, PostedMessage, RemoteFile, RemoteThread, Run, RunError,
    RunStatus, TextSegment, ThreadMessage, VectorStore,
};
use crate::domain::value_objects::MessageRole;
use crate::infrastructure::external_services::assistant_api::{
    AnnotationObject, ApiErrorResponse, AssistantCreatePayload, AssistantObject,
    AssistantUpdatePayload, ContentBlockObject, FileBatchCreatePayload, FileBatchObject,
    FileObject, MessageCreatePayload, MessageListObject, MessageObject, RunCreatePayload,
    RunObject, ThreadObject, ToolPayload, ToolResourcesPayload, VectorStoreCreatePayload,
    VectorStoreObject,
};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const BETA_HEADER: (&str, &str) = ("OpenAI-Beta", "assistants=v2");
const MAX_POLL_INTERVAL_SECS: f64 = 10.0;

#[derive(Debug, Clone)]
pub struct AssistantClientConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
    pub poll_interval_ms: u64,
    pub poll_backoff_factor: f64,
    pub poll_max_wait_secs: u64,
}

impl AssistantClientConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            timeout_secs: 60,
            poll_interval_ms: 500,
            poll_backoff_factor: 1.5,
            poll_max_wait_secs: 300,
        }
    }

    pub fn from_env() -> Result<Self, String> {
        let api_key =
            env::var("ASSISTANT_API_KEY").map_err(|_| "ASSISTANT_API_KEY not set".to_string())?;

        let mut config = Self::new(api_key);
        if let Ok(base_url) = env::var("ASSISTANT_API_BASE_URL") {
            config.base_url = base_url;
        }

        Ok(config)
    }
}

/// Thin HTTP client over the hosted assistant service. The two long-running
/// operations (index batches, runs) are polled here with a bounded backoff
/// loop instead of trusting the service to block.
#[derive(Debug, Clone)]
pub struct AssistantClient {
    client: Client,
    config: AssistantClientConfig,
}

impl AssistantClient {
    pub fn new(config: AssistantClientConfig) -> Result<Self, ReqwestError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.config.base_url, path))
            .bearer_auth(&self.config.api_key)
            .header(BETA_HEADER.0, BETA_HEADER.1)
    }

    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, AssistantGatewayError> {
        let status = response.status();

        if !status.is_success() {
            return Err(Self::api_error(status, response).await);
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AssistantGatewayError::ParseError(e.to_string()))
    }

    async fn api_error(status: StatusCode, response: reqwest::Response) -> AssistantGatewayError {
        let message = match response.json::<ApiErrorResponse>().await {
            Ok(body) => body
                .error
                .message
                .unwrap_or_else(|| "no error message provided".to_string()),
            Err(_) => "no error message provided".to_string(),
        };

        AssistantGatewayError::ApiError {
            status: status.as_u16(),
            message,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AssistantGatewayError> {
        let response = self
            .request(Method::GET, path)
            .send()
            .await
            .map_err(|e| AssistantGatewayError::NetworkError(e.without_url().to_string()))?;

        Self::decode(response).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AssistantGatewayError> {
        let response = self
            .request(Method::POST, path)
            .json(body)
            .send()
            .await
            .map_err(|e| AssistantGatewayError::NetworkError(e.without_url().to_string()))?;

        Self::decode(response).await
    }

    async fn delete_resource(&self, path: &str) -> Result<(), AssistantGatewayError> {
        let response = self
            .request(Method::DELETE, path)
            .send()
            .await
            .map_err(|e| AssistantGatewayError::NetworkError(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::api_error(status, response).await);
        }

        Ok(())
    }

    /// Re-fetches `path` until the predicate holds, backing off between
    /// attempts and giving up after the configured wait cap.
    async fn poll_until<T, F>(
        &self,
        path: &str,
        operation: &str,
        is_terminal: F,
    ) -> Result<T, AssistantGatewayError>
    where
        T: DeserializeOwned,
        F: Fn(&T) -> bool,
    {
        let started = Instant::now();
        let max_wait = Duration::from_secs(self.config.poll_max_wait_secs);
        let mut interval = Duration::from_millis(self.config.poll_interval_ms);

        loop {
            let value: T = self.get_json(path).await?;
            if is_terminal(&value) {
                return Ok(value);
            }

            if started.elapsed() >= max_wait {
                return Err(AssistantGatewayError::PollTimeout(format!(
                    "{} did not reach a terminal state within {}s",
                    operation, self.config.poll_max_wait_secs
                )));
            }

            tokio::time::sleep(interval).await;
            interval = Duration::from_secs_f64(
                (interval.as_secs_f64() * self.config.poll_backoff_factor)
                    .min(MAX_POLL_INTERVAL_SECS),
            );
        }
    }

    pub async fn create_assistant(
        &self,
        payload: &AssistantCreatePayload,
    ) -> Result<AssistantObject, AssistantGatewayError> {
        self.post_json("/assistants", payload).await
    }

    pub async fn retrieve_assistant(
        &self,
        assistant_id: &str,
    ) -> Result<AssistantObject, AssistantGatewayError> {
        self.get_json(&format!("/assistants/{}", assistant_id)).await
    }

    pub async fn update_assistant(
        &self,
        assistant_id: &str,
        payload: &AssistantUpdatePayload,
    ) -> Result<AssistantObject, AssistantGatewayError> {
        self.post_json(&format!("/assistants/{}", assistant_id), payload)
            .await
    }

    pub async fn create_vector_store(
        &self,
        name: &str,
    ) -> Result<VectorStoreObject, AssistantGatewayError> {
        self.post_json(
            "/vector_stores",
            &VectorStoreCreatePayload {
                name: name.to_string(),
            },
        )
        .await
    }

    pub async fn upload_file(
        &self,
        path: &Path,
        filename: &str,
    ) -> Result<FileObject, AssistantGatewayError> {
        let data = tokio::fs::read(path).await.map_err(|e| {
            AssistantGatewayError::NetworkError(format!(
                "Failed to read staged file {}: {}",
                path.display(),
                e
            ))
        })?;

        let form = reqwest::multipart::Form::new()
            .text("purpose", "assistants")
            .part(
                "file",
                reqwest::multipart::Part::bytes(data).file_name(filename.to_string()),
            );

        let response = self
            .request(Method::POST, "/files")
            .multipart(form)
            .send()
            .await
            .map_err(|e| AssistantGatewayError::NetworkError(e.without_url().to_string()))?;

        Self::decode(response).await
    }

    pub async fn retrieve_file(&self, file_id: &str) -> Result<FileObject, AssistantGatewayError> {
        self.get_json(&format!("/files/{}", file_id)).await
    }

    pub async fn delete_file(&self, file_id: &str) -> Result<(), AssistantGatewayError> {
        self.delete_resource(&format!("/files/{}", file_id)).await
    }

    pub async fn create_file_batch_and_poll(
        &self,
        vector_store_id: &str,
        file_id: &str,
    ) -> Result<FileBatchObject, AssistantGatewayError> {
        let batch: FileBatchObject = self
            .post_json(
                &format!("/vector_stores/{}/file_batches", vector_store_id),
                &FileBatchCreatePayload {
                    file_ids: vec![file_id.to_string()],
                },
            )
            .await?;

        if batch.status != "in_progress" {
            return Ok(batch);
        }

        self.poll_until(
            &format!(
                "/vector_stores/{}/file_batches/{}",
                vector_store_id, batch.id
            ),
            "file batch",
            |b: &FileBatchObject| b.status != "in_progress",
        )
        .await
    }

    pub async fn create_thread(&self) -> Result<ThreadObject, AssistantGatewayError> {
        self.post_json("/threads", &serde_json::json!({})).await
    }

    pub async fn delete_thread(&self, thread_id: &str) -> Result<(), AssistantGatewayError> {
        self.delete_resource(&format!("/threads/{}", thread_id)).await
    }

    pub async fn create_message(
        &self,
        thread_id: &str,
        content: &str,
    ) -> Result<MessageObject, AssistantGatewayError> {
        self.post_json(
            &format!("/threads/{}/messages", thread_id),
            &MessageCreatePayload {
                role: "user",
                content: content.to_string(),
            },
        )
        .await
    }

    pub async fn create_run_and_poll(
        &self,
        thread_id: &str,
        assistant_id: &str,
    ) -> Result<RunObject, AssistantGatewayError> {
        let run: RunObject = self
            .post_json(
                &format!("/threads/{}/runs", thread_id),
                &RunCreatePayload {
                    assistant_id: assistant_id.to_string(),
                },
            )
            .await?;

        if run_status_is_terminal(&run.status) {
            return Ok(run);
        }

        self.poll_until(
            &format!("/threads/{}/runs/{}", thread_id, run.id),
            "assistant run",
            |r: &RunObject| run_status_is_terminal(&r.status),
        )
        .await
    }

    pub async fn list_messages_after(
        &self,
        thread_id: &str,
        after_message_id: &str,
    ) -> Result<MessageListObject, AssistantGatewayError> {
        self.get_json(&format!(
            "/threads/{}/messages?order=asc&after={}",
            thread_id, after_message_id
        ))
        .await
    }
}

fn run_status_is_terminal(status: &str) -> bool {
    !matches!(status, "queued" | "in_progress" | "cancelling")
}

fn parse_run_status(status: &str) -> Result<RunStatus, AssistantGatewayError> {
    match status {
        "queued" => Ok(RunStatus::Queued),
        "in_progress" | "cancelling" => Ok(RunStatus::InProgress),
        "completed" => Ok(RunStatus::Completed),
        "requires_action" => Ok(RunStatus::RequiresAction),
        "failed" | "incomplete" => Ok(RunStatus::Failed),
        "cancelled" => Ok(RunStatus::Cancelled),
        "expired" => Ok(RunStatus::Expired),
        other => Err(AssistantGatewayError::ParseError(format!(
            "Unknown run status: {}",
            other
        ))),
    }
}

fn parse_batch_status(status: &str) -> Result<BatchStatus, AssistantGatewayError> {
    match status {
        "in_progress" => Ok(BatchStatus::InProgress),
        "completed" => Ok(BatchStatus::Completed),
        "failed" => Ok(BatchStatus::Failed),
        "cancelled" | "cancelling" => Ok(BatchStatus::Cancelled),
        other => Err(AssistantGatewayError::ParseError(format!(
            "Unknown batch status: {}",
            other
        ))),
    }
}

fn map_assistant(object: AssistantObject) -> Assistant {
    let vector_store_ids = object.vector_store_ids();
    Assistant {
        id: object.id,
        model: object.model,
        vector_store_ids,
    }
}

fn map_annotation(object: &AnnotationObject) -> Option<Annotation> {
    let kind = match object.kind.as_str() {
        "file_citation" => {
            let citation = object.file_citation.as_ref()?;
            AnnotationKind::FileCitation {
                file_id: citation.file_id.clone(),
                quote: citation.quote.clone(),
            }
        }
        "file_path" => {
            let file_path = object.file_path.as_ref()?;
            AnnotationKind::FilePath {
                file_id: file_path.file_id.clone(),
            }
        }
        other => {
            tracing::warn!(kind = other, "Skipping annotation of unknown kind");
            return None;
        }
    };

    Some(Annotation {
        text: object.text.clone(),
        start_index: object.start_index,
        end_index: object.end_index,
        kind,
    })
}

fn map_message(object: MessageObject) -> Option<ThreadMessage> {
    let role = MessageRole::from_string(&object.role).ok()?;

    let segments = object
        .content
        .into_iter()
        .filter_map(|block| match block {
            ContentBlockObject::Text { text } => Some(TextSegment {
                annotations: text.annotations.iter().filter_map(map_annotation).collect(),
                text: text.value,
            }),
            ContentBlockObject::Other => None,
        })
        .collect();

    Some(ThreadMessage {
        id: object.id,
        role,
        segments,
    })
}

/// Adapter from the wire client to the application port.
pub struct HostedAssistantGateway {
    client: AssistantClient,
}

impl HostedAssistantGateway {
    pub fn new(client: AssistantClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AssistantGateway for HostedAssistantGateway {
    async fn create_assistant(
        &self,
        request: CreateAssistantRequest,
    ) -> Result<Assistant, AssistantGatewayError> {
        let payload = AssistantCreatePayload {
            name: request.name,
            instructions: request.instructions,
            model: request.model,
            tools: vec![ToolPayload::file_search()],
            tool_resources: ToolResourcesPayload::for_vector_store(&request.vector_store_id),
        };

        let object = self.client.create_assistant(&payload).await?;
        Ok(map_assistant(object))
    }

    async fn retrieve_assistant(
        &self,
        assistant_id: &str,
    ) -> Result<Assistant, AssistantGatewayError> {
        let object = self.client.retrieve_assistant(assistant_id).await?;
        Ok(map_assistant(object))
    }

    async fn update_assistant_model(
        &self,
        assistant_id: &str,
        model: &str,
    ) -> Result<Assistant, AssistantGatewayError> {
        let payload = AssistantUpdatePayload {
            model: Some(model.to_string()),
            tool_resources: None,
        };

        let object = self.client.update_assistant(assistant_id, &payload).await?;
        Ok(map_assistant(object))
    }

    async fn update_assistant_vector_store(
        &self,
        assistant_id: &str,
        vector_store_id: &str,
    ) -> Result<Assistant, AssistantGatewayError> {
        let payload = AssistantUpdatePayload {
            model: None,
            tool_resources: Some(ToolResourcesPayload::for_vector_store(vector_store_id)),
        };

        let object = self.client.update_assistant(assistant_id, &payload).await?;
        Ok(map_assistant(object))
    }

    async fn create_vector_store(&self, name: &str) -> Result<VectorStore, AssistantGatewayError> {
        let object = self.client.create_vector_store(name).await?;
        Ok(VectorStore { id: object.id })
    }

    async fn upload_file(
        &self,
        path: &Path,
        filename: &str,
    ) -> Result<RemoteFile, AssistantGatewayError> {
        let object = self.client.upload_file(path, filename).await?;
        Ok(RemoteFile {
            id: object.id,
            filename: object.filename,
        })
    }

    async fn retrieve_file(&self, file_id: &str) -> Result<RemoteFile, AssistantGatewayError> {
        let object = self.client.retrieve_file(file_id).await?;
        Ok(RemoteFile {
            id: object.id,
            filename: object.filename,
        })
    }

    async fn delete_file(&self, file_id: &str) -> Result<(), AssistantGatewayError> {
        self.client.delete_file(file_id).await
    }

    async fn index_file(
        &self,
        vector_store_id: &str,
        file_id: &str,
    ) -> Result<IndexBatch, AssistantGatewayError> {
        let object = self
            .client
            .create_file_batch_and_poll(vector_store_id, file_id)
            .await?;

        Ok(IndexBatch {
            status: parse_batch_status(&object.status)?,
            last_error: object.last_error.map(|e| e.describe()),
            id: object.id,
        })
    }

    async fn create_thread(&self) -> Result<RemoteThread, AssistantGatewayError> {
        let object = self.client.create_thread().await?;
        Ok(RemoteThread { id: object.id })
    }

    async fn delete_thread(&self, thread_id: &str) -> Result<(), AssistantGatewayError> {
        self.client.delete_thread(thread_id).await
    }

    async fn post_user_message(
        &self,
        thread_id: &str,
        content: &str,
    ) -> Result<PostedMessage, AssistantGatewayError> {
        let object = self.client.create_message(thread_id, content).await?;
        Ok(PostedMessage { id: object.id })
    }

    async fn run_to_completion(
        &self,
        thread_id: &str,
        assistant_id: &str,
    ) -> Result<Run, AssistantGatewayError> {
        let object = self
            .client
            .create_run_and_poll(thread_id, assistant_id)
            .await?;

        Ok(Run {
            status: parse_run_status(&object.status)?,
            last_error: object.last_error.map(|e| RunError {
                code: e.code.unwrap_or_default(),
                message: e.message.unwrap_or_default(),
            }),
            id: object.id,
        })
    }

    async fn list_messages_after(
        &self,
        thread_id: &str,
        after_message_id: &str,
    ) -> Result<Vec<ThreadMessage>, AssistantGatewayError> {
        let list = self
            .client
            .list_messages_after(thread_id, after_message_id)
            .await?;

        Ok(list.data.into_iter().filter_map(map_message).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::external_services::assistant_api::TextBlockObject;

    #[test]
    fn test_run_status_parsing() {
        assert_eq!(parse_run_status("completed").unwrap(), RunStatus::Completed);
        assert_eq!(
            parse_run_status("requires_action").unwrap(),
            RunStatus::RequiresAction
        );
        assert_eq!(parse_run_status("expired").unwrap(), RunStatus::Expired);
        assert!(parse_run_status("daydreaming").is_err());
    }

    #[test]
    fn test_terminal_run_states_match_polling_predicate() {
        for status in ["queued", "in_progress", "cancelling"] {
            assert!(!run_status_is_terminal(status));
        }
        for status in ["completed", "requires_action", "failed", "cancelled", "expired"] {
            assert!(run_status_is_terminal(status));
        }
    }

    #[test]
    fn test_map_message_skips_unknown_roles() {
        let object = MessageObject {
            id: "msg_1".to_string(),
            role: "tool".to_string(),
            content: vec![],
        };

        assert!(map_message(object).is_none());
    }

    #[test]
    fn test_map_message_collects_text_segments() {
        let object = MessageObject {
            id: "msg_1".to_string(),
            role: "assistant".to_string(),
            content: vec![
                ContentBlockObject::Text {
                    text: TextBlockObject {
                        value: "part one".to_string(),
                        annotations: vec![],
                    },
                },
                ContentBlockObject::Other,
                ContentBlockObject::Text {
                    text: TextBlockObject {
                        value: " part two".to_string(),
                        annotations: vec![],
                    },
                },
            ],
        };

        let message = map_message(object).unwrap();
        assert_eq!(message.segments.len(), 2);
        assert_eq!(message.segments[0].text, "part one");
    }

    #[test]
    fn test_map_annotation_requires_matching_body() {
        let object = AnnotationObject {
            kind: "file_citation".to_string(),
            text: "【1†src】".to_string(),
            start_index: Some(0),
            end_index: Some(10),
            file_citation: None,
            file_path: None,
        };

        // A citation annotation without its body cannot be resolved.
        assert!(map_annotation(&object).is_none());
    }

    #[test]
    fn test_config_defaults() {
        let config = AssistantClientConfig::new("sk-test".to_string());

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.poll_interval_ms, 500);
        assert!(config.poll_backoff_factor > 1.0);
    }
}
