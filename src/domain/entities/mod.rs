pub mod auth_token;
pub mod chat_message;
pub mod chat_session;
pub mod project;
pub mod uploaded_file;
pub mod user;

pub use auth_token::AuthToken;
pub use chat_message::ChatMessage;
pub use chat_session::ChatSession;
pub use project::Project;
pub use uploaded_file::UploadedFile;
pub use user::User;
