use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::Project as DomainProject;
use crate::domain::value_objects::ModelName;
use crate::infrastructure::database::schema::projects;

#[derive(Debug, Clone, Queryable, Selectable, Serialize, Identifiable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProjectModel {
    pub id: Uuid,
    pub name: String,
    pub model: String,
    pub vector_store_id: Option<String>,
    pub assistant_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable, AsChangeset, Deserialize)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewProjectModel {
    pub id: Uuid,
    pub name: String,
    pub model: String,
    pub vector_store_id: Option<String>,
    pub assistant_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&DomainProject> for NewProjectModel {
    fn from(project: &DomainProject) -> Self {
        Self {
            id: project.id(),
            name: project.name().to_string(),
            model: project.model().as_str().to_string(),
            vector_store_id: project.vector_store_id().map(|s| s.to_string()),
            assistant_id: project.assistant_id().map(|s| s.to_string()),
            created_at: project.created_at(),
        }
    }
}

impl TryFrom<ProjectModel> for DomainProject {
    type Error = String;

    fn try_from(model: ProjectModel) -> Result<Self, Self::Error> {
        let model_name = ModelName::from_string(&model.model)
            .map_err(|e| format!("Invalid model on project {}: {}", model.id, e))?;

        Ok(DomainProject::restore(
            model.id,
            model.name,
            model_name,
            model.vector_store_id,
            model.assistant_id,
            model.created_at,
        ))
    }
}
