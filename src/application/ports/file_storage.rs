use async_trait::async_trait;
use std::path::PathBuf;

#[derive(Debug)]
pub enum FileStorageError {
    IoError(String),
    InvalidPath(String),
}

impl std::fmt::Display for FileStorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileStorageError::IoError(msg) => write!(f, "IO error: {}", msg),
            FileStorageError::InvalidPath(path) => write!(f, "Invalid path: {}", path),
        }
    }
}

impl std::error::Error for FileStorageError {}

#[derive(Debug, Clone)]
pub struct StagedFile {
    pub path: PathBuf,
}

/// Request-scoped staging of upload payloads. A staged file only lives for
/// the duration of one upload and is removed on every exit path.
#[async_trait]
pub trait FileStorage: Send + Sync {
    async fn stage(&self, data: &[u8], filename: &str) -> Result<StagedFile, FileStorageError>;

    async fn remove(&self, staged: &StagedFile) -> Result<bool, FileStorageError>;
}
