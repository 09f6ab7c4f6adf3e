use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::Project;
use crate::domain::repositories::project_repository::{ProjectRepository, ProjectRepositoryError};
use crate::infrastructure::database::models::{NewProjectModel, ProjectModel};
use crate::infrastructure::database::schema::projects::dsl::*;
use crate::infrastructure::database::{DbPool, get_connection_from_pool};

pub struct PostgresProjectRepository {
    pool: DbPool,
}

impl PostgresProjectRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn save(&self, project: &Project) -> Result<(), ProjectRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ProjectRepositoryError::DatabaseError(e.to_string()))?;

        let new_project = NewProjectModel::from(project);

        diesel::insert_into(projects)
            .values(&new_project)
            .execute(&mut conn)
            .map_err(|e| ProjectRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_id(
        &self,
        project_id: Uuid,
    ) -> Result<Option<Project>, ProjectRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ProjectRepositoryError::DatabaseError(e.to_string()))?;

        let result = projects
            .find(project_id)
            .first::<ProjectModel>(&mut conn)
            .optional()
            .map_err(|e| ProjectRepositoryError::DatabaseError(e.to_string()))?;

        match result {
            Some(model_row) => {
                let project = Project::try_from(model_row)
                    .map_err(ProjectRepositoryError::ValidationError)?;
                Ok(Some(project))
            }
            None => Ok(None),
        }
    }

    async fn find_all(&self) -> Result<Vec<Project>, ProjectRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ProjectRepositoryError::DatabaseError(e.to_string()))?;

        let models = projects
            .order(created_at.desc())
            .load::<ProjectModel>(&mut conn)
            .map_err(|e| ProjectRepositoryError::DatabaseError(e.to_string()))?;

        let mut results = Vec::new();
        for model_row in models {
            let project =
                Project::try_from(model_row).map_err(ProjectRepositoryError::ValidationError)?;
            results.push(project);
        }

        Ok(results)
    }

    async fn update(&self, project: &Project) -> Result<(), ProjectRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ProjectRepositoryError::DatabaseError(e.to_string()))?;

        let update_model = NewProjectModel::from(project);

        diesel::update(projects.find(project.id()))
            .set(&update_model)
            .execute(&mut conn)
            .map_err(|e| ProjectRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn delete(&self, project_id: Uuid) -> Result<bool, ProjectRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ProjectRepositoryError::DatabaseError(e.to_string()))?;

        let deleted_count = diesel::delete(projects.find(project_id))
            .execute(&mut conn)
            .map_err(|e| ProjectRepositoryError::DatabaseError(e.to_string()))?;

        Ok(deleted_count > 0)
    }
}
