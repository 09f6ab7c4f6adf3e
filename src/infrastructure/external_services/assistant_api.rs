//! Wire format of the hosted assistant service (assistants v2 REST surface).

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct ToolPayload {
    #[serde(rename = "type")]
    pub kind: &'static str,
}

impl ToolPayload {
    pub fn file_search() -> Self {
        Self {
            kind: "file_search",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FileSearchResourcesPayload {
    pub vector_store_ids: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ToolResourcesPayload {
    pub file_search: FileSearchResourcesPayload,
}

impl ToolResourcesPayload {
    pub fn for_vector_store(vector_store_id: &str) -> Self {
        Self {
            file_search: FileSearchResourcesPayload {
                vector_store_ids: vec![vector_store_id.to_string()],
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AssistantCreatePayload {
    pub name: String,
    pub instructions: String,
    pub model: String,
    pub tools: Vec<ToolPayload>,
    pub tool_resources: ToolResourcesPayload,
}

#[derive(Debug, Serialize)]
pub struct AssistantUpdatePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_resources: Option<ToolResourcesPayload>,
}

#[derive(Debug, Deserialize)]
pub struct AssistantObject {
    pub id: String,
    pub model: String,
    #[serde(default)]
    pub tool_resources: Option<ToolResourcesObject>,
}

impl AssistantObject {
    pub fn vector_store_ids(&self) -> Vec<String> {
        self.tool_resources
            .as_ref()
            .and_then(|r| r.file_search.as_ref())
            .map(|f| f.vector_store_ids.clone())
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
pub struct ToolResourcesObject {
    #[serde(default)]
    pub file_search: Option<FileSearchResourcesObject>,
}

#[derive(Debug, Deserialize)]
pub struct FileSearchResourcesObject {
    #[serde(default)]
    pub vector_store_ids: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct VectorStoreCreatePayload {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct VectorStoreObject {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct FileObject {
    pub id: String,
    pub filename: String,
}

#[derive(Debug, Serialize)]
pub struct FileBatchCreatePayload {
    pub file_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct FileBatchObject {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub last_error: Option<LastErrorObject>,
}

#[derive(Debug, Deserialize)]
pub struct ThreadObject {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct MessageCreatePayload {
    pub role: &'static str,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct MessageObject {
    pub id: String,
    pub role: String,
    #[serde(default)]
    pub content: Vec<ContentBlockObject>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum ContentBlockObject {
    #[serde(rename = "text")]
    Text { text: TextBlockObject },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
pub struct TextBlockObject {
    pub value: String,
    #[serde(default)]
    pub annotations: Vec<AnnotationObject>,
}

/// Annotations arrive as a discriminated object but older payloads omit the
/// offsets, so everything past `type` and `text` is optional.
#[derive(Debug, Deserialize)]
pub struct AnnotationObject {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
    #[serde(default)]
    pub start_index: Option<usize>,
    #[serde(default)]
    pub end_index: Option<usize>,
    #[serde(default)]
    pub file_citation: Option<FileCitationObject>,
    #[serde(default)]
    pub file_path: Option<FilePathObject>,
}

#[derive(Debug, Deserialize)]
pub struct FileCitationObject {
    pub file_id: String,
    #[serde(default)]
    pub quote: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FilePathObject {
    pub file_id: String,
}

#[derive(Debug, Deserialize)]
pub struct MessageListObject {
    #[serde(default)]
    pub data: Vec<MessageObject>,
}

#[derive(Debug, Serialize)]
pub struct RunCreatePayload {
    pub assistant_id: String,
}

#[derive(Debug, Deserialize)]
pub struct RunObject {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub last_error: Option<LastErrorObject>,
}

#[derive(Debug, Deserialize)]
pub struct LastErrorObject {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl LastErrorObject {
    pub fn describe(&self) -> String {
        match (&self.message, &self.code) {
            (Some(message), Some(code)) => format!("{} (Code: {})", message, code),
            (Some(message), None) => message.clone(),
            (None, Some(code)) => format!("Code: {}", code),
            (None, None) => "unknown error".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assistant_object_without_tool_resources() {
        let json = r#"{"id": "asst_1", "model": "gpt-4o"}"#;
        let assistant: AssistantObject = serde_json::from_str(json).unwrap();

        assert_eq!(assistant.id, "asst_1");
        assert!(assistant.vector_store_ids().is_empty());
    }

    #[test]
    fn test_assistant_object_with_linked_store() {
        let json = r#"{
            "id": "asst_1",
            "model": "gpt-4o",
            "tool_resources": {"file_search": {"vector_store_ids": ["vs_9"]}}
        }"#;
        let assistant: AssistantObject = serde_json::from_str(json).unwrap();

        assert_eq!(assistant.vector_store_ids(), vec!["vs_9".to_string()]);
    }

    #[test]
    fn test_message_with_annotation() {
        let json = r#"{
            "id": "msg_1",
            "role": "assistant",
            "content": [{
                "type": "text",
                "text": {
                    "value": "See the policy【4:0†source】.",
                    "annotations": [{
                        "type": "file_citation",
                        "text": "【4:0†source】",
                        "start_index": 14,
                        "end_index": 30,
                        "file_citation": {"file_id": "file-1", "quote": "30 days"}
                    }]
                }
            }]
        }"#;
        let message: MessageObject = serde_json::from_str(json).unwrap();

        let ContentBlockObject::Text { text } = &message.content[0] else {
            panic!("Expected a text block");
        };
        assert_eq!(text.annotations.len(), 1);
        assert_eq!(
            text.annotations[0]
                .file_citation
                .as_ref()
                .unwrap()
                .quote
                .as_deref(),
            Some("30 days")
        );
    }

    #[test]
    fn test_unknown_content_block_is_tolerated() {
        let json = r#"{
            "id": "msg_1",
            "role": "assistant",
            "content": [{"type": "image_file", "image_file": {"file_id": "file-1"}}]
        }"#;
        let message: MessageObject = serde_json::from_str(json).unwrap();

        assert!(matches!(message.content[0], ContentBlockObject::Other));
    }

    #[test]
    fn test_last_error_description() {
        let error = LastErrorObject {
            code: Some("rate_limit_exceeded".to_string()),
            message: Some("Too many requests".to_string()),
        };

        assert_eq!(error.describe(), "Too many requests (Code: rate_limit_exceeded)");
    }
}
