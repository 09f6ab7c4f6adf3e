use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::presentation::http::handlers::ChatHandler;

pub fn chat_routes(chat_handler: Arc<ChatHandler>) -> Router {
    Router::new()
        .route(
            "/projects/{project_id}/sessions/{session_id}/chat",
            post(ChatHandler::post_message),
        )
        .route(
            "/projects/{project_id}/sessions/{session_id}/messages",
            get(ChatHandler::list_messages),
        )
        .with_state(chat_handler)
}
