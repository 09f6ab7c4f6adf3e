use axum::{Router, routing::post};
use std::sync::Arc;

use crate::presentation::http::handlers::AuthHandler;

/// Login is the only route reachable without a token.
pub fn login_routes(auth_handler: Arc<AuthHandler>) -> Router {
    Router::new()
        .route("/login", post(AuthHandler::login))
        .with_state(auth_handler)
}

/// Logout needs the resolved caller, so it lives behind the auth middleware.
pub fn logout_routes(auth_handler: Arc<AuthHandler>) -> Router {
    Router::new()
        .route("/logout", post(AuthHandler::logout))
        .with_state(auth_handler)
}
