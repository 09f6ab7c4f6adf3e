use axum::{
    Router,
    routing::{delete, get, post, put},
};
use std::sync::Arc;

use crate::presentation::http::handlers::ProjectHandler;

pub fn project_routes(project_handler: Arc<ProjectHandler>) -> Router {
    Router::new()
        .route("/projects", get(ProjectHandler::list_projects))
        .route("/projects", post(ProjectHandler::create_project))
        .route("/projects/{project_id}", get(ProjectHandler::get_project))
        .route("/projects/{project_id}", put(ProjectHandler::update_project))
        .route(
            "/projects/{project_id}",
            delete(ProjectHandler::delete_project),
        )
        .with_state(project_handler)
}
