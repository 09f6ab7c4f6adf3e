use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::UploadedFile;
use crate::domain::repositories::uploaded_file_repository::{
    UploadedFileRepository, UploadedFileRepositoryError,
};
use crate::infrastructure::database::models::{NewUploadedFileModel, UploadedFileModel};
use crate::infrastructure::database::schema::uploaded_files::dsl::*;
use crate::infrastructure::database::{DbPool, get_connection_from_pool};

pub struct PostgresUploadedFileRepository {
    pool: DbPool,
}

impl PostgresUploadedFileRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UploadedFileRepository for PostgresUploadedFileRepository {
    async fn save(&self, file: &UploadedFile) -> Result<(), UploadedFileRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| UploadedFileRepositoryError::DatabaseError(e.to_string()))?;

        let new_file = NewUploadedFileModel::from(file);

        diesel::insert_into(uploaded_files)
            .values(&new_file)
            .execute(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::DatabaseError(
                    diesel::result::DatabaseErrorKind::UniqueViolation,
                    info,
                ) => UploadedFileRepositoryError::DuplicateError(info.message().to_string()),
                other => UploadedFileRepositoryError::DatabaseError(other.to_string()),
            })?;

        Ok(())
    }

    async fn find_by_project(
        &self,
        for_project: Uuid,
    ) -> Result<Vec<UploadedFile>, UploadedFileRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| UploadedFileRepositoryError::DatabaseError(e.to_string()))?;

        let models = uploaded_files
            .filter(project_id.eq(for_project))
            .order(uploaded_at.desc())
            .load::<UploadedFileModel>(&mut conn)
            .map_err(|e| UploadedFileRepositoryError::DatabaseError(e.to_string()))?;

        Ok(models.into_iter().map(UploadedFile::from).collect())
    }
}
