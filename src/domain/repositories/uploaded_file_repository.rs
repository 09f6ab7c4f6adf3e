use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::UploadedFile;

#[derive(Debug)]
pub enum UploadedFileRepositoryError {
    DatabaseError(String),
    ValidationError(String),
    DuplicateError(String),
}

impl std::fmt::Display for UploadedFileRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadedFileRepositoryError::DatabaseError(msg) => {
                write!(f, "Database error: {}", msg)
            }
            UploadedFileRepositoryError::ValidationError(msg) => {
                write!(f, "Validation error: {}", msg)
            }
            UploadedFileRepositoryError::DuplicateError(msg) => {
                write!(f, "Duplicate error: {}", msg)
            }
        }
    }
}

impl std::error::Error for UploadedFileRepositoryError {}

#[async_trait]
pub trait UploadedFileRepository: Send + Sync {
    async fn save(&self, file: &UploadedFile) -> Result<(), UploadedFileRepositoryError>;

    /// Files for a project, newest first.
    async fn find_by_project(
        &self,
        project_id: Uuid,
    ) -> Result<Vec<UploadedFile>, UploadedFileRepositoryError>;
}
