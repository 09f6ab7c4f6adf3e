pub mod auth_handler;
pub mod chat_handler;
pub mod file_handler;
pub mod project_handler;
pub mod session_handler;

pub use auth_handler::AuthHandler;
pub use chat_handler::ChatHandler;
pub use file_handler::FileHandler;
pub use project_handler::ProjectHandler;
pub use session_handler::SessionHandler;
