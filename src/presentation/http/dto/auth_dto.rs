use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct LoginRequestDto {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponseDto {
    pub token: String,
}
