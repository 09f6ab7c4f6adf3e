pub mod auth;

pub use auth::{AuthState, require_auth};
