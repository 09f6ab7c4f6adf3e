use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::use_cases::create_session::{
    CreateSessionError, CreateSessionRequest, CreateSessionUseCase,
};
use crate::application::use_cases::delete_session::{
    DeleteSessionError, DeleteSessionRequest, DeleteSessionUseCase,
};
use crate::domain::repositories::{ChatSessionRepository, ProjectRepository};
use crate::presentation::http::dto::{
    ApiResponse, CreateSessionDto, SessionResponseDto, UpdateSessionDto,
};

pub struct SessionHandler {
    create_use_case: Arc<CreateSessionUseCase>,
    delete_use_case: Arc<DeleteSessionUseCase>,
    session_repository: Arc<dyn ChatSessionRepository>,
    project_repository: Arc<dyn ProjectRepository>,
}

impl SessionHandler {
    pub fn new(
        create_use_case: Arc<CreateSessionUseCase>,
        delete_use_case: Arc<DeleteSessionUseCase>,
        session_repository: Arc<dyn ChatSessionRepository>,
        project_repository: Arc<dyn ProjectRepository>,
    ) -> Self {
        Self {
            create_use_case,
            delete_use_case,
            session_repository,
            project_repository,
        }
    }

    pub async fn list_sessions(
        State(handler): State<Arc<SessionHandler>>,
        Path(project_id): Path<Uuid>,
    ) -> Result<impl IntoResponse, StatusCode> {
        match handler.project_repository.find_by_id(project_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok((
                    StatusCode::NOT_FOUND,
                    Json(ApiResponse::<Vec<SessionResponseDto>>::error(
                        "PROJECT_NOT_FOUND".to_string(),
                        format!("Project not found: {}", project_id),
                        None,
                    )),
                ));
            }
            Err(e) => {
                return Ok((
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::<Vec<SessionResponseDto>>::error(
                        "FETCH_FAILED".to_string(),
                        e.to_string(),
                        None,
                    )),
                ));
            }
        }

        match handler.session_repository.find_by_project(project_id).await {
            Ok(sessions) => {
                let dtos: Vec<SessionResponseDto> =
                    sessions.into_iter().map(SessionResponseDto::from).collect();
                Ok((StatusCode::OK, Json(ApiResponse::success(dtos))))
            }
            Err(e) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Vec<SessionResponseDto>>::error(
                    "LIST_FAILED".to_string(),
                    e.to_string(),
                    None,
                )),
            )),
        }
    }

    pub async fn create_session(
        State(handler): State<Arc<SessionHandler>>,
        Path(project_id): Path<Uuid>,
        payload: Option<Json<CreateSessionDto>>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let payload = payload.map(|Json(dto)| dto).unwrap_or_default();

        let request = CreateSessionRequest {
            project_id,
            name: payload.name,
        };

        match handler.create_use_case.execute(request).await {
            Ok(response) => Ok((
                StatusCode::CREATED,
                Json(ApiResponse::success(SessionResponseDto::from(
                    response.session,
                ))),
            )),
            Err(CreateSessionError::ProjectNotFound(id)) => Ok((
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<SessionResponseDto>::error(
                    "PROJECT_NOT_FOUND".to_string(),
                    format!("Project not found: {}", id),
                    None,
                )),
            )),
            Err(e @ CreateSessionError::ThreadCreationFailed(_)) => Ok((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<SessionResponseDto>::error(
                    "SESSION_INIT_FAILED".to_string(),
                    e.to_string(),
                    None,
                )),
            )),
            Err(e) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<SessionResponseDto>::error(
                    "CREATE_FAILED".to_string(),
                    e.to_string(),
                    None,
                )),
            )),
        }
    }

    pub async fn get_session(
        State(handler): State<Arc<SessionHandler>>,
        Path((project_id, session_id)): Path<(Uuid, Uuid)>,
    ) -> Result<impl IntoResponse, StatusCode> {
        match handler
            .session_repository
            .find_in_project(project_id, session_id)
            .await
        {
            Ok(Some(session)) => Ok((
                StatusCode::OK,
                Json(ApiResponse::success(SessionResponseDto::from(session))),
            )),
            Ok(None) => Ok((
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<SessionResponseDto>::error(
                    "SESSION_NOT_FOUND".to_string(),
                    format!("Chat session not found: {}", session_id),
                    None,
                )),
            )),
            Err(e) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<SessionResponseDto>::error(
                    "FETCH_FAILED".to_string(),
                    e.to_string(),
                    None,
                )),
            )),
        }
    }

    pub async fn update_session(
        State(handler): State<Arc<SessionHandler>>,
        Path((project_id, session_id)): Path<(Uuid, Uuid)>,
        Json(payload): Json<UpdateSessionDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let mut session = match handler
            .session_repository
            .find_in_project(project_id, session_id)
            .await
        {
            Ok(Some(session)) => session,
            Ok(None) => {
                return Ok((
                    StatusCode::NOT_FOUND,
                    Json(ApiResponse::<SessionResponseDto>::error(
                        "SESSION_NOT_FOUND".to_string(),
                        format!("Chat session not found: {}", session_id),
                        None,
                    )),
                ));
            }
            Err(e) => {
                return Ok((
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::<SessionResponseDto>::error(
                        "FETCH_FAILED".to_string(),
                        e.to_string(),
                        None,
                    )),
                ));
            }
        };

        session.rename(payload.name);

        match handler.session_repository.update(&session).await {
            Ok(()) => Ok((
                StatusCode::OK,
                Json(ApiResponse::success(SessionResponseDto::from(session))),
            )),
            Err(e) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<SessionResponseDto>::error(
                    "UPDATE_FAILED".to_string(),
                    e.to_string(),
                    None,
                )),
            )),
        }
    }

    pub async fn delete_session(
        State(handler): State<Arc<SessionHandler>>,
        Path((project_id, session_id)): Path<(Uuid, Uuid)>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let request = DeleteSessionRequest {
            project_id,
            session_id,
        };

        match handler.delete_use_case.execute(request).await {
            Ok(()) => Ok(StatusCode::NO_CONTENT.into_response()),
            Err(DeleteSessionError::SessionNotFound(id)) => Ok((
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<()>::error(
                    "SESSION_NOT_FOUND".to_string(),
                    format!("Chat session not found: {}", id),
                    None,
                )),
            )
                .into_response()),
            Err(e) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error(
                    "DELETE_FAILED".to_string(),
                    e.to_string(),
                    None,
                )),
            )
                .into_response()),
        }
    }
}
