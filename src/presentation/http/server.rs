use axum::{Router, middleware};
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::classify::ServerErrorsFailureClass;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::presentation::http::{
    handlers::{AuthHandler, ChatHandler, FileHandler, ProjectHandler, SessionHandler},
    middleware::{AuthState, require_auth},
    routes::{
        chat_routes, file_routes, health_routes, login_routes, logout_routes, project_routes,
        session_routes,
    },
};

pub struct HttpServer {
    project_handler: Arc<ProjectHandler>,
    file_handler: Arc<FileHandler>,
    session_handler: Arc<SessionHandler>,
    chat_handler: Arc<ChatHandler>,
    auth_handler: Arc<AuthHandler>,
    auth_state: AuthState,
    port: u16,
}

impl HttpServer {
    pub fn new(
        project_handler: Arc<ProjectHandler>,
        file_handler: Arc<FileHandler>,
        session_handler: Arc<SessionHandler>,
        chat_handler: Arc<ChatHandler>,
        auth_handler: Arc<AuthHandler>,
        auth_state: AuthState,
        port: Option<u16>,
    ) -> Self {
        Self {
            project_handler,
            file_handler,
            session_handler,
            chat_handler,
            auth_handler,
            auth_state,
            port: port.unwrap_or(8000),
        }
    }

    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        let protected = Router::new()
            .merge(project_routes(self.project_handler))
            .merge(file_routes(self.file_handler))
            .merge(session_routes(self.session_handler))
            .merge(chat_routes(self.chat_handler))
            .merge(logout_routes(self.auth_handler.clone()))
            .layer(middleware::from_fn_with_state(
                self.auth_state,
                require_auth,
            ));

        let api = Router::new()
            .merge(login_routes(self.auth_handler))
            .merge(protected);

        let app = Router::new()
            .merge(health_routes())
            .nest("/api", api)
            .layer(cors)
            .layer(RequestBodyLimitLayer::new(50 * 1024 * 1024)) // 50MB cap
            .layer(
                TraceLayer::new_for_http()
                    .on_request(
                        |request: &axum::http::Request<axum::body::Body>, _span: &tracing::Span| {
                            tracing::info!(
                                "Received request: {} {}",
                                request.method(),
                                request.uri()
                            );
                        },
                    )
                    .on_response(
                        |response: &axum::http::Response<axum::body::Body>,
                         latency: std::time::Duration,
                         _span: &tracing::Span| {
                            tracing::info!(
                                "Response: {} (took {} ms)",
                                response.status(),
                                latency.as_millis()
                            );
                        },
                    )
                    .on_failure(
                        |error: ServerErrorsFailureClass,
                         latency: std::time::Duration,
                         _span: &tracing::Span| {
                            tracing::error!(
                                "Request failed: {:?} (took {} ms)",
                                error,
                                latency.as_millis()
                            );
                        },
                    ),
            );

        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        tracing::info!("Server listening on {}", addr);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}
