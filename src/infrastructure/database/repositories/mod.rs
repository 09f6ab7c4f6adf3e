pub mod postgres_auth_repository;
pub mod postgres_chat_message_repository;
pub mod postgres_chat_session_repository;
pub mod postgres_project_repository;
pub mod postgres_uploaded_file_repository;

pub use postgres_auth_repository::PostgresAuthRepository;
pub use postgres_chat_message_repository::PostgresChatMessageRepository;
pub use postgres_chat_session_repository::PostgresChatSessionRepository;
pub use postgres_project_repository::PostgresProjectRepository;
pub use postgres_uploaded_file_repository::PostgresUploadedFileRepository;
