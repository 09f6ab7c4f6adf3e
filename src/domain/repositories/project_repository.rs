use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::Project;

#[derive(Debug)]
pub enum ProjectRepositoryError {
    NotFound(Uuid),
    DatabaseError(String),
    ValidationError(String),
}

impl std::fmt::Display for ProjectRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectRepositoryError::NotFound(id) => write!(f, "Project not found: {}", id),
            ProjectRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            ProjectRepositoryError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for ProjectRepositoryError {}

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn save(&self, project: &Project) -> Result<(), ProjectRepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>, ProjectRepositoryError>;
    async fn find_all(&self) -> Result<Vec<Project>, ProjectRepositoryError>;
    async fn update(&self, project: &Project) -> Result<(), ProjectRepositoryError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ProjectRepositoryError>;
}
