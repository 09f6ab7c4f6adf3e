mod application;
mod domain;
mod infrastructure;
mod presentation;

use tracing_subscriber::EnvFilter;

use crate::infrastructure::container::AppContainer;
use crate::presentation::http::HttpServer;
use crate::presentation::http::middleware::AuthState;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let container = match AppContainer::new().await {
        Ok(container) => container,
        Err(e) => {
            tracing::error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    };

    let port = std::env::var("PORT").ok().and_then(|p| p.parse().ok());

    let auth_state = AuthState {
        tokens: container.token_repository.clone(),
    };

    let server = HttpServer::new(
        container.project_handler.clone(),
        container.file_handler.clone(),
        container.session_handler.clone(),
        container.chat_handler.clone(),
        container.auth_handler.clone(),
        auth_state,
        port,
    );

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
