use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::ModelName;

/// A project groups uploaded documents and chat sessions around one external
/// retrieval corpus. The vector store and assistant ids are handed out by the
/// hosted service and cached here once allocated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    id: Uuid,
    name: String,
    model: ModelName,
    vector_store_id: Option<String>,
    assistant_id: Option<String>,
    created_at: DateTime<Utc>,
}

impl Project {
    pub fn new(name: String, model: ModelName) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            model,
            vector_store_id: None,
            assistant_id: None,
            created_at: Utc::now(),
        }
    }

    pub fn restore(
        id: Uuid,
        name: String,
        model: ModelName,
        vector_store_id: Option<String>,
        assistant_id: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            model,
            vector_store_id,
            assistant_id,
            created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn model(&self) -> ModelName {
        self.model
    }

    pub fn vector_store_id(&self) -> Option<&str> {
        self.vector_store_id.as_deref()
    }

    pub fn assistant_id(&self) -> Option<&str> {
        self.assistant_id.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn rename(&mut self, name: String) {
        self.name = name;
    }

    pub fn set_model(&mut self, model: ModelName) {
        self.model = model;
    }

    /// Records the externally-allocated vector store. Only meaningful on the
    /// first upload; later calls overwrite with the same id.
    pub fn attach_vector_store(&mut self, vector_store_id: String) {
        self.vector_store_id = Some(vector_store_id);
    }

    /// Records the externally-created assistant. An assistant is only usable
    /// with a retrieval corpus behind it, so a vector store must already be
    /// attached.
    pub fn attach_assistant(&mut self, assistant_id: String) -> Result<(), String> {
        if self.vector_store_id.is_none() {
            return Err("Project must have a vector store before an assistant".to_string());
        }

        self.assistant_id = Some(assistant_id);
        Ok(())
    }

    pub fn has_vector_store(&self) -> bool {
        self.vector_store_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_project_has_no_external_resources() {
        let project = Project::new("Handbook".to_string(), ModelName::default());

        assert!(project.vector_store_id().is_none());
        assert!(project.assistant_id().is_none());
        assert!(!project.has_vector_store());
    }

    #[test]
    fn test_assistant_requires_vector_store() {
        let mut project = Project::new("Handbook".to_string(), ModelName::Gpt4o);

        assert!(project.attach_assistant("asst_1".to_string()).is_err());

        project.attach_vector_store("vs_1".to_string());
        assert!(project.attach_assistant("asst_1".to_string()).is_ok());
        assert_eq!(project.assistant_id(), Some("asst_1"));
    }

    #[test]
    fn test_rename_and_model_change() {
        let mut project = Project::new("Old".to_string(), ModelName::Gpt35Turbo);

        project.rename("New".to_string());
        project.set_model(ModelName::Gpt4Turbo);

        assert_eq!(project.name(), "New");
        assert_eq!(project.model(), ModelName::Gpt4Turbo);
    }
}
