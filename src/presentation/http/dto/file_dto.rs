use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::UploadedFile;

#[derive(Debug, Serialize)]
pub struct FileResponseDto {
    pub id: Uuid,
    pub project_id: Uuid,
    pub filename: String,
    pub external_file_id: String,
    pub uploaded_at: String,
}

impl From<UploadedFile> for FileResponseDto {
    fn from(file: UploadedFile) -> Self {
        Self {
            id: file.id(),
            project_id: file.project_id(),
            filename: file.filename().to_string(),
            external_file_id: file.external_file_id().to_string(),
            uploaded_at: file.uploaded_at().to_rfc3339(),
        }
    }
}
