pub mod auth_token_model;
pub mod chat_message_model;
pub mod chat_session_model;
pub mod project_model;
pub mod uploaded_file_model;
pub mod user_model;

pub use auth_token_model::AuthTokenModel;
pub use chat_message_model::{ChatMessageModel, NewChatMessageModel};
pub use chat_session_model::{ChatSessionModel, NewChatSessionModel};
pub use project_model::{NewProjectModel, ProjectModel};
pub use uploaded_file_model::{NewUploadedFileModel, UploadedFileModel};
pub use user_model::{NewUserModel, UserModel};
