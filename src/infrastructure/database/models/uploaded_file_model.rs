use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::UploadedFile as DomainUploadedFile;
use crate::infrastructure::database::schema::uploaded_files;

#[derive(Debug, Clone, Queryable, Selectable, Serialize, Identifiable)]
#[diesel(table_name = uploaded_files)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UploadedFileModel {
    pub id: Uuid,
    pub project_id: Uuid,
    pub filename: String,
    pub external_file_id: String,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Insertable, Deserialize)]
#[diesel(table_name = uploaded_files)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewUploadedFileModel {
    pub id: Uuid,
    pub project_id: Uuid,
    pub filename: String,
    pub external_file_id: String,
    pub uploaded_at: DateTime<Utc>,
}

impl From<&DomainUploadedFile> for NewUploadedFileModel {
    fn from(file: &DomainUploadedFile) -> Self {
        Self {
            id: file.id(),
            project_id: file.project_id(),
            filename: file.filename().to_string(),
            external_file_id: file.external_file_id().to_string(),
            uploaded_at: file.uploaded_at(),
        }
    }
}

impl From<UploadedFileModel> for DomainUploadedFile {
    fn from(model: UploadedFileModel) -> Self {
        DomainUploadedFile::restore(
            model.id,
            model.project_id,
            model.filename,
            model.external_file_id,
            model.uploaded_at,
        )
    }
}
