use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::use_cases::upload_document::{
    UploadDocumentError, UploadDocumentRequest, UploadDocumentUseCase,
};
use crate::domain::repositories::{ProjectRepository, UploadedFileRepository};
use crate::presentation::http::dto::{ApiResponse, FileResponseDto};

pub struct FileHandler {
    upload_use_case: Arc<UploadDocumentUseCase>,
    file_repository: Arc<dyn UploadedFileRepository>,
    project_repository: Arc<dyn ProjectRepository>,
}

impl FileHandler {
    pub fn new(
        upload_use_case: Arc<UploadDocumentUseCase>,
        file_repository: Arc<dyn UploadedFileRepository>,
        project_repository: Arc<dyn ProjectRepository>,
    ) -> Self {
        Self {
            upload_use_case,
            file_repository,
            project_repository,
        }
    }

    pub async fn upload_file(
        State(handler): State<Arc<FileHandler>>,
        Path(project_id): Path<Uuid>,
        mut multipart: Multipart,
    ) -> Result<impl IntoResponse, StatusCode> {
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|_| StatusCode::BAD_REQUEST)?
        {
            if field.name() != Some("file") {
                continue;
            }

            let filename = field
                .file_name()
                .ok_or(StatusCode::BAD_REQUEST)?
                .to_string();

            let data = field
                .bytes()
                .await
                .map_err(|_| StatusCode::BAD_REQUEST)?
                .to_vec();

            let request = UploadDocumentRequest {
                project_id,
                filename,
                data,
            };

            return match handler.upload_use_case.execute(request).await {
                Ok(response) => Ok((
                    StatusCode::CREATED,
                    Json(ApiResponse::success(FileResponseDto::from(response.file))),
                )),
                Err(UploadDocumentError::ProjectNotFound(id)) => Ok((
                    StatusCode::NOT_FOUND,
                    Json(ApiResponse::<FileResponseDto>::error(
                        "PROJECT_NOT_FOUND".to_string(),
                        format!("Project not found: {}", id),
                        None,
                    )),
                )),
                Err(UploadDocumentError::ValidationError(msg)) => Ok((
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::<FileResponseDto>::error(
                        "INVALID_UPLOAD".to_string(),
                        msg,
                        None,
                    )),
                )),
                Err(e @ UploadDocumentError::IndexingFailed { .. }) => Ok((
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::<FileResponseDto>::error(
                        "INDEXING_FAILED".to_string(),
                        e.to_string(),
                        None,
                    )),
                )),
                Err(e) => {
                    tracing::error!(project_id = %project_id, error = %e, "Error during file upload");
                    Ok((
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(ApiResponse::<FileResponseDto>::error(
                            "UPLOAD_FAILED".to_string(),
                            "An unexpected error occurred".to_string(),
                            None,
                        )),
                    ))
                }
            };
        }

        Ok((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<FileResponseDto>::error(
                "NO_FILE_PROVIDED".to_string(),
                "No file provided".to_string(),
                None,
            )),
        ))
    }

    pub async fn list_files(
        State(handler): State<Arc<FileHandler>>,
        Path(project_id): Path<Uuid>,
    ) -> Result<impl IntoResponse, StatusCode> {
        match handler.project_repository.find_by_id(project_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok((
                    StatusCode::NOT_FOUND,
                    Json(ApiResponse::<Vec<FileResponseDto>>::error(
                        "PROJECT_NOT_FOUND".to_string(),
                        format!("Project not found: {}", project_id),
                        None,
                    )),
                ));
            }
            Err(e) => {
                return Ok((
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::<Vec<FileResponseDto>>::error(
                        "FETCH_FAILED".to_string(),
                        e.to_string(),
                        None,
                    )),
                ));
            }
        }

        match handler.file_repository.find_by_project(project_id).await {
            Ok(files) => {
                let dtos: Vec<FileResponseDto> =
                    files.into_iter().map(FileResponseDto::from).collect();
                Ok((StatusCode::OK, Json(ApiResponse::success(dtos))))
            }
            Err(e) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Vec<FileResponseDto>>::error(
                    "LIST_FAILED".to_string(),
                    e.to_string(),
                    None,
                )),
            )),
        }
    }
}
