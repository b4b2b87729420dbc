use okulpanel_client::ApiError;
use reqwest::StatusCode;
use validator::ValidationErrors;

use crate::validator::format_errors;

/// Error type for feature service calls.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The signed-in user's record lacks an identifier the call needs.
    #[error("user record has no {field}")]
    MissingIdentity { field: &'static str },
}

impl ServiceError {
    pub fn user_message(&self) -> String {
        match self {
            ServiceError::Api(e) => e.user_message(),
            ServiceError::MissingIdentity { .. } => {
                "Bu işlem için gerekli kullanıcı bilgisi bulunamadı.".to_string()
            }
        }
    }
}

/// Error type for login.
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("invalid login request: {}", format_errors(.0))]
    Validation(#[from] ValidationErrors),

    /// The server answered `false`, with a success or an error status.
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("malformed login response: {0}")]
    MalformedResponse(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl LoginError {
    pub fn user_message(&self) -> String {
        match self {
            LoginError::Validation(_) => "Lütfen tüm alanları doldurun.".to_string(),
            LoginError::InvalidCredentials => "Kullanıcı adı veya şifre yanlış.".to_string(),
            LoginError::MalformedResponse(_) => "Geçersiz yanıt formatı.".to_string(),
            LoginError::Api(e) if e.status() == Some(StatusCode::BAD_REQUEST) => {
                "Bilgiler boş veya yanlış gönderilmiştir.".to_string()
            }
            LoginError::Api(e) => e.user_message(),
        }
    }
}
