use reqwest::StatusCode;
use serde_json::Value;

/// Message the platform sends in place of a 401 when a token has expired.
pub const TOKEN_INVALID_MESSAGE: &str = "Token geçersiz veya süresi dolmuş";

/// Error type for API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No response was received.
    #[error("network error calling {path}: {source}")]
    Network {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("{path} returned {status}{}", message_suffix(.message))]
    Status {
        path: String,
        status: StatusCode,
        message: Option<String>,
        body: Value,
    },

    /// A success response whose body could not be read into the expected type.
    #[error("unexpected response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode request body: {0}")]
    Serialize(#[source] serde_json::Error),
}

fn message_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {}", m))
        .unwrap_or_default()
}

impl ApiError {
    pub(crate) fn status_error(path: &str, status: StatusCode, body: Value) -> Self {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string);
        ApiError::Status {
            path: path.to_string(),
            status,
            message,
            body,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The `message` field of the error body, if the server sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Whether the server rejected the credentials: a 401, or the
    /// token-expired message under any status.
    pub fn is_auth_invalid(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
            || self.server_message() == Some(TOKEN_INVALID_MESSAGE)
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network { .. })
    }

    /// Text suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network { .. } => {
                "Sunucuya ulaşılamadı. İnternet bağlantınızı kontrol edin.".to_string()
            }
            ApiError::Status {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            ApiError::Status { status, .. } if *status == StatusCode::UNAUTHORIZED => {
                "Oturumunuzun süresi doldu. Lütfen tekrar giriş yapın.".to_string()
            }
            ApiError::Status { status, .. } => {
                format!("İstek başarısız oldu ({}).", status.as_u16())
            }
            ApiError::Decode { .. } => "Sunucudan beklenmeyen bir yanıt alındı.".to_string(),
            ApiError::Serialize(_) => "İstek hazırlanamadı.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_auth_invalid_by_status() {
        let err = ApiError::status_error("/user/info", StatusCode::UNAUTHORIZED, Value::Null);
        assert!(err.is_auth_invalid());
        assert_eq!(err.server_message(), None);
    }

    #[test]
    fn test_auth_invalid_by_message() {
        let err = ApiError::status_error(
            "/user/info",
            StatusCode::FORBIDDEN,
            json!({"message": TOKEN_INVALID_MESSAGE}),
        );
        assert!(err.is_auth_invalid());
        assert_eq!(err.user_message(), TOKEN_INVALID_MESSAGE);
    }

    #[test]
    fn test_other_statuses_are_not_auth_failures() {
        let err = ApiError::status_error(
            "/student/all",
            StatusCode::NOT_FOUND,
            json!({"message": "Kayıt bulunamadı"}),
        );
        assert!(!err.is_auth_invalid());
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(err.user_message(), "Kayıt bulunamadı");
        assert_eq!(err.to_string(), "/student/all returned 404 Not Found: Kayıt bulunamadı");
    }

    #[test]
    fn test_user_message_without_server_message() {
        let err = ApiError::status_error("/x", StatusCode::INTERNAL_SERVER_ERROR, json!("oops"));
        assert_eq!(err.user_message(), "İstek başarısız oldu (500).");
    }
}
