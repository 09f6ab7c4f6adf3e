pub mod create_session;
pub mod delete_session;
pub mod send_chat_message;
pub mod upload_document;

pub use create_session::CreateSessionUseCase;
pub use delete_session::DeleteSessionUseCase;
pub use send_chat_message::SendChatMessageUseCase;
pub use upload_document::UploadDocumentUseCase;
