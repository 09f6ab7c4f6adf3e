use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::Project;

#[derive(Debug, Deserialize)]
pub struct CreateProjectDto {
    pub name: String,
    pub model: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProjectDto {
    pub name: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProjectResponseDto {
    pub id: Uuid,
    pub name: String,
    pub model: String,
    pub vector_store_id: Option<String>,
    pub assistant_id: Option<String>,
    pub created_at: String,
}

impl From<Project> for ProjectResponseDto {
    fn from(project: Project) -> Self {
        Self {
            id: project.id(),
            name: project.name().to_string(),
            model: project.model().as_str().to_string(),
            vector_store_id: project.vector_store_id().map(|s| s.to_string()),
            assistant_id: project.assistant_id().map(|s| s.to_string()),
            created_at: project.created_at().to_rfc3339(),
        }
    }
}
