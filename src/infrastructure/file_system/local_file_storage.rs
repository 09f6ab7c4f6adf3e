use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use uuid::Uuid;

use crate::application::ports::file_storage::{FileStorage, FileStorageError, StagedFile};

/// Stages upload payloads under a local temp directory until they have been
/// shipped to the assistant service.
pub struct LocalFileStorage {
    base_path: PathBuf,
}

impl LocalFileStorage {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    pub async fn ensure_directory_exists(&self) -> Result<(), FileStorageError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| FileStorageError::IoError(e.to_string()))
    }

    /// Client-supplied names are reduced to their final component so a staged
    /// file can never escape the temp directory.
    fn staged_path(&self, filename: &str) -> Result<PathBuf, FileStorageError> {
        let name = std::path::Path::new(filename)
            .file_name()
            .ok_or_else(|| FileStorageError::InvalidPath(filename.to_string()))?;

        Ok(self
            .base_path
            .join(format!("{}_{}", Uuid::new_v4(), name.to_string_lossy())))
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn stage(&self, data: &[u8], filename: &str) -> Result<StagedFile, FileStorageError> {
        self.ensure_directory_exists().await?;

        let path = self.staged_path(filename)?;

        fs::write(&path, data)
            .await
            .map_err(|e| FileStorageError::IoError(e.to_string()))?;

        Ok(StagedFile { path })
    }

    async fn remove(&self, staged: &StagedFile) -> Result<bool, FileStorageError> {
        if !staged.path.exists() {
            return Ok(false);
        }

        fs::remove_file(&staged.path)
            .await
            .map_err(|e| FileStorageError::IoError(e.to_string()))?;

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stage_writes_payload() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalFileStorage::new(dir.path().to_path_buf());

        let staged = storage.stage(b"hello", "notes.txt").await.unwrap();

        assert!(staged.path.starts_with(dir.path()));
        assert_eq!(fs::read(&staged.path).await.unwrap(), b"hello");
    }

    #[tokio::test]
    async fn test_remove_deletes_staged_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalFileStorage::new(dir.path().to_path_buf());

        let staged = storage.stage(b"hello", "notes.txt").await.unwrap();

        assert!(storage.remove(&staged).await.unwrap());
        assert!(!staged.path.exists());

        // Second removal is a no-op.
        assert!(!storage.remove(&staged).await.unwrap());
    }

    #[tokio::test]
    async fn test_traversal_components_are_stripped() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalFileStorage::new(dir.path().to_path_buf());

        let staged = storage.stage(b"x", "../../etc/passwd").await.unwrap();

        assert!(staged.path.starts_with(dir.path()));
        assert!(staged.path.to_string_lossy().ends_with("passwd"));
    }

    #[tokio::test]
    async fn test_same_filename_stages_to_distinct_paths() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalFileStorage::new(dir.path().to_path_buf());

        let first = storage.stage(b"a", "report.pdf").await.unwrap();
        let second = storage.stage(b"b", "report.pdf").await.unwrap();

        assert_ne!(first.path, second.path);
    }
}
