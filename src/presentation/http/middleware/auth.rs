use axum::{
    Json,
    extract::{Request, State},
    http::{StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::domain::entities::User;
use crate::domain::repositories::TokenRepository;
use crate::presentation::http::dto::ApiResponse;

/// The resolved caller, inserted as a request extension for handlers that
/// need it (logout).
#[derive(Clone)]
pub struct AuthenticatedUser(pub User);

#[derive(Clone)]
pub struct AuthState {
    pub tokens: Arc<dyn TokenRepository>,
}

/// Resolves the bearer token on every protected route. `Token <key>` is
/// accepted alongside `Bearer <key>` for older clients.
pub async fn require_auth(
    State(state): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let token = header.and_then(|h| {
        h.strip_prefix("Bearer ")
            .or_else(|| h.strip_prefix("Token "))
    });

    let Some(token) = token else {
        return unauthorized("Authentication credentials were not provided");
    };

    match state.tokens.find_user_by_token(token).await {
        Ok(Some(user)) => {
            request.extensions_mut().insert(AuthenticatedUser(user));
            next.run(request).await
        }
        Ok(None) => unauthorized("Invalid token"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to resolve auth token");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error(
                    "AUTH_FAILED".to_string(),
                    "An unexpected error occurred".to_string(),
                    None,
                )),
            )
                .into_response()
        }
    }
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ApiResponse::<()>::error(
            "UNAUTHENTICATED".to_string(),
            message.to_string(),
            None,
        )),
    )
        .into_response()
}
