use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::ChatMessage;
use crate::domain::value_objects::Citation;

#[derive(Debug, Deserialize)]
pub struct ChatRequestDto {
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CitationDto {
    pub marker: String,
    pub file_id: String,
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl From<Citation> for CitationDto {
    fn from(citation: Citation) -> Self {
        Self {
            marker: citation.marker,
            file_id: citation.file_id,
            filename: citation.filename,
            quote: citation.quote,
            kind: citation.path_citation.then(|| "file_path".to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChatResponseDto {
    pub reply: String,
    pub citations: Vec<CitationDto>,
}

#[derive(Debug, Serialize)]
pub struct ChatMessageResponseDto {
    pub id: Uuid,
    pub session_id: Uuid,
    pub role: String,
    pub content: String,
    pub timestamp: String,
}

impl From<ChatMessage> for ChatMessageResponseDto {
    fn from(message: ChatMessage) -> Self {
        Self {
            id: message.id(),
            session_id: message.session_id(),
            role: message.role().as_str().to_string(),
            content: message.content().to_string(),
            timestamp: message.timestamp().to_rfc3339(),
        }
    }
}
