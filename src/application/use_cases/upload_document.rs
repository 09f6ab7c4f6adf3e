use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::assistant_gateway::{
    AssistantGateway, BatchStatus, RemoteFile,
};
use crate::application::ports::file_storage::{FileStorage, StagedFile};
use crate::domain::entities::{Project, UploadedFile};
use crate::domain::repositories::project_repository::{ProjectRepository, ProjectRepositoryError};
use crate::domain::repositories::uploaded_file_repository::{
    UploadedFileRepository, UploadedFileRepositoryError,
};

#[derive(Debug)]
pub enum UploadDocumentError {
    ProjectNotFound(Uuid),
    ValidationError(String),
    IndexingFailed { status: String, detail: Option<String> },
    GatewayError(String),
    StorageError(String),
    RepositoryError(String),
}

impl std::fmt::Display for UploadDocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadDocumentError::ProjectNotFound(id) => write!(f, "Project not found: {}", id),
            UploadDocumentError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            UploadDocumentError::IndexingFailed { status, detail } => {
                write!(f, "Failed to add file to project knowledge base. Status: {}", status)?;
                if let Some(detail) = detail {
                    write!(f, " ({})", detail)?;
                }
                Ok(())
            }
            UploadDocumentError::GatewayError(msg) => write!(f, "Gateway error: {}", msg),
            UploadDocumentError::StorageError(msg) => write!(f, "Storage error: {}", msg),
            UploadDocumentError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for UploadDocumentError {}

impl From<ProjectRepositoryError> for UploadDocumentError {
    fn from(error: ProjectRepositoryError) -> Self {
        UploadDocumentError::RepositoryError(error.to_string())
    }
}

impl From<UploadedFileRepositoryError> for UploadDocumentError {
    fn from(error: UploadedFileRepositoryError) -> Self {
        UploadDocumentError::RepositoryError(error.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct UploadDocumentRequest {
    pub project_id: Uuid,
    pub filename: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct UploadDocumentResponse {
    pub file: UploadedFile,
}

/// Sequences vector-store creation, staging, remote upload, indexing and the
/// local record. Every step after the remote upload compensates by deleting
/// the remote file on failure; the staged temp file is removed on every exit
/// path.
pub struct UploadDocumentUseCase {
    project_repository: Arc<dyn ProjectRepository>,
    file_repository: Arc<dyn UploadedFileRepository>,
    file_storage: Arc<dyn FileStorage>,
    gateway: Arc<dyn AssistantGateway>,
}

impl UploadDocumentUseCase {
    pub fn new(
        project_repository: Arc<dyn ProjectRepository>,
        file_repository: Arc<dyn UploadedFileRepository>,
        file_storage: Arc<dyn FileStorage>,
        gateway: Arc<dyn AssistantGateway>,
    ) -> Self {
        Self {
            project_repository,
            file_repository,
            file_storage,
            gateway,
        }
    }

    pub async fn execute(
        &self,
        request: UploadDocumentRequest,
    ) -> Result<UploadDocumentResponse, UploadDocumentError> {
        if request.filename.trim().is_empty() {
            return Err(UploadDocumentError::ValidationError(
                "File name cannot be empty".to_string(),
            ));
        }

        if request.data.is_empty() {
            return Err(UploadDocumentError::ValidationError(
                "File data cannot be empty".to_string(),
            ));
        }

        let mut project = self
            .project_repository
            .find_by_id(request.project_id)
            .await?
            .ok_or(UploadDocumentError::ProjectNotFound(request.project_id))?;

        let vector_store_id = self.ensure_vector_store(&mut project).await?;

        let staged = self
            .file_storage
            .stage(&request.data, &request.filename)
            .await
            .map_err(|e| UploadDocumentError::StorageError(e.to_string()))?;

        let outcome = self
            .upload_and_index(&project, &vector_store_id, &request.filename, &staged)
            .await;

        if let Err(err) = self.file_storage.remove(&staged).await {
            tracing::error!(path = %staged.path.display(), error = %err, "Failed to remove staged upload");
        }

        let file = outcome?;
        Ok(UploadDocumentResponse { file })
    }

    /// Creates the project's vector store on first use and persists its id.
    /// Concurrent first uploads can race this check and leak a duplicate
    /// remote store; see the deployment notes.
    async fn ensure_vector_store(
        &self,
        project: &mut Project,
    ) -> Result<String, UploadDocumentError> {
        if let Some(id) = project.vector_store_id() {
            return Ok(id.to_string());
        }

        tracing::info!(project_id = %project.id(), "No vector store for project, creating one");

        let vector_store = self
            .gateway
            .create_vector_store(&format!(
                "Vector Store for Project {} - {}",
                project.id(),
                project.name()
            ))
            .await
            .map_err(|e| UploadDocumentError::GatewayError(e.to_string()))?;

        project.attach_vector_store(vector_store.id.clone());
        self.project_repository.update(project).await?;

        tracing::info!(
            project_id = %project.id(),
            vector_store_id = %vector_store.id,
            "Created vector store for project"
        );

        Ok(vector_store.id)
    }

    async fn upload_and_index(
        &self,
        project: &Project,
        vector_store_id: &str,
        filename: &str,
        staged: &StagedFile,
    ) -> Result<UploadedFile, UploadDocumentError> {
        let remote = self
            .gateway
            .upload_file(&staged.path, filename)
            .await
            .map_err(|e| UploadDocumentError::GatewayError(e.to_string()))?;

        tracing::info!(external_file_id = %remote.id, "File uploaded to assistant service");

        match self.index_and_record(project, vector_store_id, filename, &remote).await {
            Ok(file) => Ok(file),
            Err(err) => {
                if let Err(delete_err) = self.gateway.delete_file(&remote.id).await {
                    tracing::error!(
                        external_file_id = %remote.id,
                        error = %delete_err,
                        "Failed to clean up external file after upload failure"
                    );
                } else {
                    tracing::info!(
                        external_file_id = %remote.id,
                        "Cleaned up external file after upload failure"
                    );
                }
                Err(err)
            }
        }
    }

    async fn index_and_record(
        &self,
        project: &Project,
        vector_store_id: &str,
        filename: &str,
        remote: &RemoteFile,
    ) -> Result<UploadedFile, UploadDocumentError> {
        let batch = self
            .gateway
            .index_file(vector_store_id, &remote.id)
            .await
            .map_err(|e| UploadDocumentError::GatewayError(e.to_string()))?;

        if batch.status != BatchStatus::Completed {
            tracing::error!(
                external_file_id = %remote.id,
                vector_store_id,
                status = %batch.status,
                error = ?batch.last_error,
                "Indexing batch did not complete"
            );
            return Err(UploadDocumentError::IndexingFailed {
                status: batch.status.to_string(),
                detail: batch.last_error.clone(),
            });
        }

        tracing::info!(
            external_file_id = %remote.id,
            vector_store_id,
            "File added to vector store"
        );

        let file = UploadedFile::new(project.id(), filename.to_string(), remote.id.clone());
        self.file_repository.save(&file).await?;

        Ok(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{
        InMemoryFileStorage, InMemoryProjectRepository, InMemoryUploadedFileRepository,
        StubGateway,
    };
    use crate::domain::value_objects::ModelName;

    struct Fixture {
        projects: Arc<InMemoryProjectRepository>,
        files: Arc<InMemoryUploadedFileRepository>,
        storage: Arc<InMemoryFileStorage>,
        gateway: Arc<StubGateway>,
        use_case: UploadDocumentUseCase,
    }

    fn fixture() -> Fixture {
        let projects = Arc::new(InMemoryProjectRepository::new());
        let files = Arc::new(InMemoryUploadedFileRepository::new());
        let storage = Arc::new(InMemoryFileStorage::new());
        let gateway = Arc::new(StubGateway::new());
        let use_case = UploadDocumentUseCase::new(
            projects.clone(),
            files.clone(),
            storage.clone(),
            gateway.clone(),
        );

        Fixture {
            projects,
            files,
            storage,
            gateway,
            use_case,
        }
    }

    async fn seed_project(fixture: &Fixture) -> Project {
        let project = Project::new("Handbook".to_string(), ModelName::Gpt4o);
        fixture.projects.save(&project).await.unwrap();
        project
    }

    fn request(project_id: Uuid) -> UploadDocumentRequest {
        UploadDocumentRequest {
            project_id,
            filename: "policy.pdf".to_string(),
            data: b"%PDF-1.4".to_vec(),
        }
    }

    #[tokio::test]
    async fn test_first_upload_creates_vector_store_and_record() {
        let fixture = fixture();
        let project = seed_project(&fixture).await;

        let response = fixture.use_case.execute(request(project.id())).await.unwrap();

        assert_eq!(response.file.filename(), "policy.pdf");

        let stored_project = fixture
            .projects
            .find_by_id(project.id())
            .await
            .unwrap()
            .unwrap();
        assert!(stored_project.has_vector_store());
        assert_eq!(fixture.gateway.calls("create_vector_store"), 1);
        assert_eq!(fixture.files.stored().len(), 1);
        assert_eq!(fixture.storage.staged().len(), 1);
        assert_eq!(fixture.storage.removed().len(), 1);
    }

    #[tokio::test]
    async fn test_second_upload_reuses_vector_store() {
        let fixture = fixture();
        let project = seed_project(&fixture).await;

        fixture.use_case.execute(request(project.id())).await.unwrap();
        fixture.use_case.execute(request(project.id())).await.unwrap();

        assert_eq!(fixture.gateway.calls("create_vector_store"), 1);
        assert_eq!(fixture.files.stored().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_indexing_deletes_remote_file_and_keeps_no_row() {
        let fixture = fixture();
        let project = seed_project(&fixture).await;
        fixture
            .gateway
            .set_batch_outcome(BatchStatus::Failed, Some("unsupported file type"));

        let result = fixture.use_case.execute(request(project.id())).await;

        match result {
            Err(UploadDocumentError::IndexingFailed { status, detail }) => {
                assert_eq!(status, "failed");
                assert_eq!(detail.as_deref(), Some("unsupported file type"));
            }
            other => panic!("Expected IndexingFailed, got {:?}", other),
        }

        assert_eq!(fixture.gateway.deleted_files().len(), 1);
        assert!(fixture.files.stored().is_empty());
        assert_eq!(fixture.storage.removed().len(), 1);
    }

    #[tokio::test]
    async fn test_record_save_failure_compensates_remote_file() {
        let fixture = fixture();
        let project = seed_project(&fixture).await;
        fixture.files.fail_saves();

        let result = fixture.use_case.execute(request(project.id())).await;

        assert!(matches!(result, Err(UploadDocumentError::RepositoryError(_))));
        assert_eq!(fixture.gateway.deleted_files().len(), 1);
        assert_eq!(fixture.storage.removed().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_project_is_rejected_before_any_remote_call() {
        let fixture = fixture();

        let result = fixture.use_case.execute(request(Uuid::new_v4())).await;

        assert!(matches!(result, Err(UploadDocumentError::ProjectNotFound(_))));
        assert_eq!(fixture.gateway.calls("upload_file"), 0);
        assert_eq!(fixture.gateway.calls("create_vector_store"), 0);
    }

    #[tokio::test]
    async fn test_empty_payload_is_rejected() {
        let fixture = fixture();
        let project = seed_project(&fixture).await;

        let mut bad_request = request(project.id());
        bad_request.data.clear();

        let result = fixture.use_case.execute(bad_request).await;

        assert!(matches!(result, Err(UploadDocumentError::ValidationError(_))));
    }
}
