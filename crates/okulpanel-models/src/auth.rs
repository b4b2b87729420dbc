//! Authentication DTOs.
//!
//! Login posts a username and password and receives either a JSON object
//! carrying a token and a role code, or the bare literal `false` when the
//! credentials are wrong. Token refresh exchanges a refresh token for a new
//! access token (and optionally a rotated refresh token).

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::serde::{deserialize_lenient_string, deserialize_optional_string};

/// Login request with username and password.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into().trim().to_string(),
            password: password.into(),
        }
    }
}

/// Successful login payload.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub token: Option<String>,
    /// Numeric role code, see [`crate::roles::codes`].
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub rol: Option<String>,
    #[serde(
        default,
        rename = "refreshToken",
        deserialize_with = "deserialize_optional_string"
    )]
    pub refresh_token: Option<String>,
}

/// Either outcome of `/user/login`.
#[derive(Debug, Clone)]
pub enum LoginReply {
    /// The server answered `false`.
    Rejected,
    Accepted(LoginResponse),
}

impl LoginReply {
    pub fn from_json(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        match value {
            serde_json::Value::Bool(false) => Ok(LoginReply::Rejected),
            other => serde_json::from_value(other).map(LoginReply::Accepted),
        }
    }
}

/// Request to exchange a refresh token.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshTokenRequest {
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
}

/// Refresh endpoint response.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshTokenResponse {
    #[serde(
        default,
        rename = "accessToken",
        deserialize_with = "deserialize_optional_string"
    )]
    pub access_token: Option<String>,
    #[serde(
        default,
        rename = "refreshToken",
        deserialize_with = "deserialize_optional_string"
    )]
    pub refresh_token: Option<String>,
}
