pub mod container;
pub mod database;
pub mod external_services;
pub mod file_system;

// Re-export commonly used items
pub use database::{DbPool, create_connection_pool};
pub use external_services::HostedAssistantGateway;
pub use file_system::LocalFileStorage;
