use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::use_cases::send_chat_message::{
    SendChatMessageError, SendChatMessageRequest, SendChatMessageUseCase,
};
use crate::domain::repositories::{ChatMessageRepository, ChatSessionRepository};
use crate::presentation::http::dto::{
    ApiResponse, ChatMessageResponseDto, ChatRequestDto, ChatResponseDto, CitationDto,
};

pub struct ChatHandler {
    send_message_use_case: Arc<SendChatMessageUseCase>,
    message_repository: Arc<dyn ChatMessageRepository>,
    session_repository: Arc<dyn ChatSessionRepository>,
}

impl ChatHandler {
    pub fn new(
        send_message_use_case: Arc<SendChatMessageUseCase>,
        message_repository: Arc<dyn ChatMessageRepository>,
        session_repository: Arc<dyn ChatSessionRepository>,
    ) -> Self {
        Self {
            send_message_use_case,
            message_repository,
            session_repository,
        }
    }

    pub async fn post_message(
        State(handler): State<Arc<ChatHandler>>,
        Path((project_id, session_id)): Path<(Uuid, Uuid)>,
        Json(payload): Json<ChatRequestDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let Some(message) = payload.message.filter(|m| !m.trim().is_empty()) else {
            return Ok((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<ChatResponseDto>::error(
                    "NO_MESSAGE_PROVIDED".to_string(),
                    "No message provided".to_string(),
                    None,
                )),
            ));
        };

        let request = SendChatMessageRequest {
            project_id,
            session_id,
            message,
        };

        match handler.send_message_use_case.execute(request).await {
            Ok(response) => {
                let dto = ChatResponseDto {
                    reply: response.reply,
                    citations: response
                        .citations
                        .into_iter()
                        .map(CitationDto::from)
                        .collect(),
                };
                Ok((StatusCode::OK, Json(ApiResponse::success(dto))))
            }
            Err(SendChatMessageError::ProjectNotFound(id)) => Ok((
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<ChatResponseDto>::error(
                    "PROJECT_NOT_FOUND".to_string(),
                    format!("Project not found: {}", id),
                    None,
                )),
            )),
            Err(SendChatMessageError::SessionNotFound(id)) => Ok((
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<ChatResponseDto>::error(
                    "SESSION_NOT_FOUND".to_string(),
                    format!("Chat session not found: {}", id),
                    None,
                )),
            )),
            Err(SendChatMessageError::ValidationError(msg)) => Ok((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<ChatResponseDto>::error(
                    "INVALID_CHAT_REQUEST".to_string(),
                    msg,
                    None,
                )),
            )),
            Err(SendChatMessageError::RunRequiresAction) => Ok((
                StatusCode::NOT_IMPLEMENTED,
                Json(ApiResponse::<ChatResponseDto>::error(
                    "RUN_REQUIRES_ACTION".to_string(),
                    "Assistant run requires further action".to_string(),
                    None,
                )),
            )),
            Err(e @ SendChatMessageError::RunFailed { .. }) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<ChatResponseDto>::error(
                    "RUN_FAILED".to_string(),
                    e.to_string(),
                    None,
                )),
            )),
            Err(e) => {
                tracing::error!(
                    session_id = %session_id,
                    error = %e,
                    "Error during chat processing"
                );
                Ok((
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::<ChatResponseDto>::error(
                        "CHAT_FAILED".to_string(),
                        "An unexpected error occurred".to_string(),
                        None,
                    )),
                ))
            }
        }
    }

    pub async fn list_messages(
        State(handler): State<Arc<ChatHandler>>,
        Path((project_id, session_id)): Path<(Uuid, Uuid)>,
    ) -> Result<impl IntoResponse, StatusCode> {
        match handler
            .session_repository
            .find_in_project(project_id, session_id)
            .await
        {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok((
                    StatusCode::NOT_FOUND,
                    Json(ApiResponse::<Vec<ChatMessageResponseDto>>::error(
                        "SESSION_NOT_FOUND".to_string(),
                        format!("Chat session not found: {}", session_id),
                        None,
                    )),
                ));
            }
            Err(e) => {
                return Ok((
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::<Vec<ChatMessageResponseDto>>::error(
                        "FETCH_FAILED".to_string(),
                        e.to_string(),
                        None,
                    )),
                ));
            }
        }

        match handler.message_repository.find_by_session(session_id).await {
            Ok(messages) => {
                let dtos: Vec<ChatMessageResponseDto> = messages
                    .into_iter()
                    .map(ChatMessageResponseDto::from)
                    .collect();
                Ok((StatusCode::OK, Json(ApiResponse::success(dtos))))
            }
            Err(e) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Vec<ChatMessageResponseDto>>::error(
                    "LIST_FAILED".to_string(),
                    e.to_string(),
                    None,
                )),
            )),
        }
    }
}
