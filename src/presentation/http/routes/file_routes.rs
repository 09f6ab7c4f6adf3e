use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::presentation::http::handlers::FileHandler;

pub fn file_routes(file_handler: Arc<FileHandler>) -> Router {
    Router::new()
        .route(
            "/projects/{project_id}/upload",
            post(FileHandler::upload_file),
        )
        .route("/projects/{project_id}/files", get(FileHandler::list_files))
        .with_state(file_handler)
}
