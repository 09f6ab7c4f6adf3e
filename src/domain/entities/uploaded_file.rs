use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Local record of a document that was uploaded and indexed remotely. The
/// external file id is the handle the hosted service knows the document by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedFile {
    id: Uuid,
    project_id: Uuid,
    filename: String,
    external_file_id: String,
    uploaded_at: DateTime<Utc>,
}

impl UploadedFile {
    pub fn new(project_id: Uuid, filename: String, external_file_id: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            project_id,
            filename,
            external_file_id,
            uploaded_at: Utc::now(),
        }
    }

    pub fn restore(
        id: Uuid,
        project_id: Uuid,
        filename: String,
        external_file_id: String,
        uploaded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            project_id,
            filename,
            external_file_id,
            uploaded_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn project_id(&self) -> Uuid {
        self.project_id
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn external_file_id(&self) -> &str {
        &self.external_file_id
    }

    pub fn uploaded_at(&self) -> DateTime<Utc> {
        self.uploaded_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_creation() {
        let project_id = Uuid::new_v4();
        let file = UploadedFile::new(
            project_id,
            "policy.pdf".to_string(),
            "file-abc123".to_string(),
        );

        assert_eq!(file.project_id(), project_id);
        assert_eq!(file.filename(), "policy.pdf");
        assert_eq!(file.external_file_id(), "file-abc123");
    }
}
