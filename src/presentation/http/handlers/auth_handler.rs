use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

use crate::domain::repositories::{TokenRepository, UserRepository};
use crate::presentation::http::dto::{
    ApiResponse, LoginRequestDto, LoginResponseDto, MessageResponseDto,
};
use crate::presentation::http::middleware::auth::AuthenticatedUser;

pub struct AuthHandler {
    user_repository: Arc<dyn UserRepository>,
    token_repository: Arc<dyn TokenRepository>,
}

impl AuthHandler {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        token_repository: Arc<dyn TokenRepository>,
    ) -> Self {
        Self {
            user_repository,
            token_repository,
        }
    }

    pub async fn login(
        State(handler): State<Arc<AuthHandler>>,
        Json(payload): Json<LoginRequestDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let (Some(username), Some(password)) = (payload.username, payload.password) else {
            return Ok((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<LoginResponseDto>::error(
                    "MISSING_CREDENTIALS".to_string(),
                    "Username and password are required".to_string(),
                    None,
                )),
            ));
        };

        let user = match handler.user_repository.find_by_username(&username).await {
            Ok(user) => user,
            Err(e) => {
                tracing::error!(error = %e, "Failed to look up user");
                return Ok((
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::<LoginResponseDto>::error(
                        "LOGIN_FAILED".to_string(),
                        "An unexpected error occurred".to_string(),
                        None,
                    )),
                ));
            }
        };

        let authenticated = user.filter(|u| u.verify_password(&password));

        let Some(user) = authenticated else {
            tracing::warn!(username = %username, "Failed login attempt");
            return Ok((
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::<LoginResponseDto>::error(
                    "INVALID_CREDENTIALS".to_string(),
                    "Invalid username or password".to_string(),
                    None,
                )),
            ));
        };

        match handler.token_repository.get_or_create(user.id()).await {
            Ok(token) => {
                tracing::info!(username = %user.username(), "User logged in");
                Ok((
                    StatusCode::OK,
                    Json(ApiResponse::success(LoginResponseDto {
                        token: token.token().to_string(),
                    })),
                ))
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to issue token");
                Ok((
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::<LoginResponseDto>::error(
                        "LOGIN_FAILED".to_string(),
                        "An unexpected error occurred".to_string(),
                        None,
                    )),
                ))
            }
        }
    }

    pub async fn logout(
        State(handler): State<Arc<AuthHandler>>,
        Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
    ) -> Result<impl IntoResponse, StatusCode> {
        match handler.token_repository.delete_for_user(user.id()).await {
            Ok(_) => {
                tracing::info!(username = %user.username(), "User logged out");
                Ok((
                    StatusCode::OK,
                    Json(ApiResponse::success(MessageResponseDto {
                        message: "Logged out successfully".to_string(),
                    })),
                ))
            }
            Err(e) => {
                tracing::error!(username = %user.username(), error = %e, "Error logging out");
                Ok((
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::<MessageResponseDto>::error(
                        "LOGOUT_FAILED".to_string(),
                        "An error occurred while logging out".to_string(),
                        None,
                    )),
                ))
            }
        }
    }
}
