pub mod auth_repository;
pub mod chat_message_repository;
pub mod chat_session_repository;
pub mod project_repository;
pub mod uploaded_file_repository;

pub use auth_repository::{TokenRepository, UserRepository};
pub use chat_message_repository::ChatMessageRepository;
pub use chat_session_repository::ChatSessionRepository;
pub use project_repository::ProjectRepository;
pub use uploaded_file_repository::UploadedFileRepository;
