use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::Project;
use crate::domain::repositories::ProjectRepository;
use crate::domain::value_objects::ModelName;
use crate::presentation::http::dto::{
    ApiResponse, CreateProjectDto, ProjectResponseDto, UpdateProjectDto,
};

pub struct ProjectHandler {
    project_repository: Arc<dyn ProjectRepository>,
}

impl ProjectHandler {
    pub fn new(project_repository: Arc<dyn ProjectRepository>) -> Self {
        Self { project_repository }
    }

    pub async fn list_projects(
        State(handler): State<Arc<ProjectHandler>>,
    ) -> Result<impl IntoResponse, StatusCode> {
        match handler.project_repository.find_all().await {
            Ok(projects) => {
                let dtos: Vec<ProjectResponseDto> =
                    projects.into_iter().map(ProjectResponseDto::from).collect();
                Ok((StatusCode::OK, Json(ApiResponse::success(dtos))))
            }
            Err(e) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Vec<ProjectResponseDto>>::error(
                    "LIST_FAILED".to_string(),
                    e.to_string(),
                    None,
                )),
            )),
        }
    }

    pub async fn create_project(
        State(handler): State<Arc<ProjectHandler>>,
        Json(payload): Json<CreateProjectDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        if payload.name.trim().is_empty() {
            return Ok((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<ProjectResponseDto>::error(
                    "INVALID_NAME".to_string(),
                    "Project name cannot be empty".to_string(),
                    None,
                )),
            ));
        }

        let model = match payload.model {
            Some(raw) => match ModelName::from_string(&raw) {
                Ok(model) => model,
                Err(e) => {
                    return Ok((
                        StatusCode::BAD_REQUEST,
                        Json(ApiResponse::<ProjectResponseDto>::error(
                            "INVALID_MODEL".to_string(),
                            e,
                            None,
                        )),
                    ));
                }
            },
            None => ModelName::default(),
        };

        let project = Project::new(payload.name, model);

        match handler.project_repository.save(&project).await {
            Ok(()) => Ok((
                StatusCode::CREATED,
                Json(ApiResponse::success(ProjectResponseDto::from(project))),
            )),
            Err(e) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<ProjectResponseDto>::error(
                    "CREATE_FAILED".to_string(),
                    e.to_string(),
                    None,
                )),
            )),
        }
    }

    pub async fn get_project(
        State(handler): State<Arc<ProjectHandler>>,
        Path(project_id): Path<Uuid>,
    ) -> Result<impl IntoResponse, StatusCode> {
        match handler.project_repository.find_by_id(project_id).await {
            Ok(Some(project)) => Ok((
                StatusCode::OK,
                Json(ApiResponse::success(ProjectResponseDto::from(project))),
            )),
            Ok(None) => Ok((
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<ProjectResponseDto>::error(
                    "PROJECT_NOT_FOUND".to_string(),
                    format!("Project not found: {}", project_id),
                    None,
                )),
            )),
            Err(e) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<ProjectResponseDto>::error(
                    "FETCH_FAILED".to_string(),
                    e.to_string(),
                    None,
                )),
            )),
        }
    }

    pub async fn update_project(
        State(handler): State<Arc<ProjectHandler>>,
        Path(project_id): Path<Uuid>,
        Json(payload): Json<UpdateProjectDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let mut project = match handler.project_repository.find_by_id(project_id).await {
            Ok(Some(project)) => project,
            Ok(None) => {
                return Ok((
                    StatusCode::NOT_FOUND,
                    Json(ApiResponse::<ProjectResponseDto>::error(
                        "PROJECT_NOT_FOUND".to_string(),
                        format!("Project not found: {}", project_id),
                        None,
                    )),
                ));
            }
            Err(e) => {
                return Ok((
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::<ProjectResponseDto>::error(
                        "FETCH_FAILED".to_string(),
                        e.to_string(),
                        None,
                    )),
                ));
            }
        };

        if let Some(name) = payload.name {
            project.rename(name);
        }

        if let Some(raw) = payload.model {
            match ModelName::from_string(&raw) {
                Ok(model) => project.set_model(model),
                Err(e) => {
                    return Ok((
                        StatusCode::BAD_REQUEST,
                        Json(ApiResponse::<ProjectResponseDto>::error(
                            "INVALID_MODEL".to_string(),
                            e,
                            None,
                        )),
                    ));
                }
            }
        }

        match handler.project_repository.update(&project).await {
            Ok(()) => Ok((
                StatusCode::OK,
                Json(ApiResponse::success(ProjectResponseDto::from(project))),
            )),
            Err(e) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<ProjectResponseDto>::error(
                    "UPDATE_FAILED".to_string(),
                    e.to_string(),
                    None,
                )),
            )),
        }
    }

    pub async fn delete_project(
        State(handler): State<Arc<ProjectHandler>>,
        Path(project_id): Path<Uuid>,
    ) -> Result<impl IntoResponse, StatusCode> {
        match handler.project_repository.delete(project_id).await {
            Ok(true) => Ok(StatusCode::NO_CONTENT.into_response()),
            Ok(false) => Ok((
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<()>::error(
                    "PROJECT_NOT_FOUND".to_string(),
                    format!("Project not found: {}", project_id),
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
