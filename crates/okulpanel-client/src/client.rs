//! The API client.
//!
//! Every call is a JSON `POST` against the configured base URL. The stored
//! access token is attached as a bearer header. When the server rejects the
//! token, the client exchanges the stored refresh token once and replays the
//! request with the new token; if that is not possible it notifies the
//! registered [`AuthFailureHandler`] and returns the original error.

use std::sync::Arc;
use std::time::Instant;

use okulpanel_config::ApiConfig;
use okulpanel_models::{RefreshTokenRequest, RefreshTokenResponse};
use okulpanel_storage::TokenStore;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};

use crate::auth::AuthFailureHandler;
use crate::error::ApiError;
use crate::upload;

/// Path of the token refresh endpoint.
pub const REFRESH_PATH: &str = "/auth/refresh";

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
    store: TokenStore,
    auth_failure_handler: Option<Arc<dyn AuthFailureHandler>>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.config.base_url.as_str())
            .field("has_auth_failure_handler", &self.auth_failure_handler.is_some())
            .finish_non_exhaustive()
    }
}

/// Builds an [`ApiClient`]. The auth-failure handler is fixed once built.
pub struct ApiClientBuilder {
    config: ApiConfig,
    store: TokenStore,
    http: Option<reqwest::Client>,
    auth_failure_handler: Option<Arc<dyn AuthFailureHandler>>,
}

impl ApiClientBuilder {
    /// Use a custom HTTP client (for connection pool reuse or testing).
    #[must_use]
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http = Some(client);
        self
    }

    #[must_use]
    pub fn auth_failure_handler(mut self, handler: Arc<dyn AuthFailureHandler>) -> Self {
        self.auth_failure_handler = Some(handler);
        self
    }

    pub fn build(self) -> ApiClient {
        ApiClient {
            http: self.http.unwrap_or_default(),
            config: self.config,
            store: self.store,
            auth_failure_handler: self.auth_failure_handler,
        }
    }
}

impl ApiClient {
    pub fn builder(config: ApiConfig, store: TokenStore) -> ApiClientBuilder {
        ApiClientBuilder {
            config,
            store,
            http: None,
            auth_failure_handler: None,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn store(&self) -> &TokenStore {
        &self.store
    }

    /// Public URL of an uploaded photo.
    pub fn upload_url(&self, filename: &str) -> Option<String> {
        upload::upload_url(&self.config, filename)
    }

    /// Posts `body` to `path` and decodes the JSON response.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body).map_err(ApiError::Serialize)?;
        let value = self.post_value(path, &body).await?;
        decode(path, value)
    }

    /// Posts `body` to `path` once. A rejected token is returned as is,
    /// without a refresh or a forced logout.
    #[instrument(skip(self, body), fields(http.path = %path))]
    pub async fn post_once<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body).map_err(ApiError::Serialize)?;
        let token = self.store.access_token().await;
        let value = self.send(path, &body, token.as_deref()).await?;
        decode(path, value)
    }

    /// Posts `body` to `path` and returns the raw JSON response. An empty
    /// response body reads as `null`.
    #[instrument(skip(self, body), fields(http.path = %path))]
    pub async fn post_value(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        let mut first_rejection: Option<ApiError> = None;
        let mut bearer_override: Option<String> = None;

        loop {
            let token = match bearer_override.take() {
                Some(token) => Some(token),
                None => self.store.access_token().await,
            };

            let err = match self.send(path, body, token.as_deref()).await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_auth_invalid() => err,
                Err(err) => return Err(err),
            };

            // the replay's rejection is logged; the caller sees the first one
            let err = match first_rejection.take() {
                Some(first) => {
                    debug!(http.path = %path, error = %err, "Replayed request rejected");
                    first
                }
                None => match self.refresh_access_token().await {
                    Some(new_token) => {
                        info!(http.path = %path, "Access token refreshed, replaying request");
                        first_rejection = Some(err);
                        bearer_override = Some(new_token);
                        continue;
                    }
                    None => err,
                },
            };

            warn!(http.path = %path, "Authentication could not be recovered");
            self.notify_auth_failure().await;
            return Err(err);
        }
    }

    /// Exchanges the stored refresh token for a new access token and stores
    /// the result. Returns the new access token.
    ///
    /// The exchange is sent directly, so a failing refresh never triggers
    /// another refresh.
    async fn refresh_access_token(&self) -> Option<String> {
        let Some(refresh_token) = self.store.refresh_token().await else {
            debug!("No refresh token stored");
            return None;
        };

        let request = RefreshTokenRequest { refresh_token };
        let body = match serde_json::to_value(&request) {
            Ok(body) => body,
            Err(e) => {
                error!(error = %e, "Failed to encode refresh request");
                return None;
            }
        };

        let value = match self.send(REFRESH_PATH, &body, None).await {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "Token refresh failed");
                return None;
            }
        };

        let response: RefreshTokenResponse = match serde_json::from_value(value) {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Unreadable token refresh response");
                return None;
            }
        };

        let Some(access_token) = response.access_token else {
            warn!("Token refresh response carried no access token");
            return None;
        };

        self.store.set_access_token(Some(&access_token)).await;
        if let Some(refresh_token) = response.refresh_token.as_deref() {
            self.store.set_refresh_token(Some(refresh_token)).await;
        }

        Some(access_token)
    }

    async fn notify_auth_failure(&self) {
        match &self.auth_failure_handler {
            Some(handler) => handler.on_auth_failure().await,
            None => debug!("No auth failure handler registered"),
        }
    }

    /// Sends one request without any recovery.
    async fn send(&self, path: &str, body: &Value, token: Option<&str>) -> Result<Value, ApiError> {
        let url = self.config.endpoint(path);
        let request_id = uuid::Uuid::new_v4().to_string();
        let start = Instant::now();

        debug!(
            request_id = %request_id,
            method = "POST",
            path = %path,
            authorized = token.is_some(),
            "Outgoing request"
        );

        let mut request = self.http.post(&url).json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(source) => {
                error!(
                    request_id = %request_id,
                    method = "POST",
                    path = %path,
                    latency_ms = %start.elapsed().as_millis(),
                    error = %source,
                    "Request failed"
                );
                return Err(ApiError::Network {
                    path: path.to_string(),
                    source,
                });
            }
        };

        let status = response.status();
        let bytes = response.bytes().await.map_err(|source| ApiError::Network {
            path: path.to_string(),
            source,
        })?;
        let latency = start.elapsed();

        match status.as_u16() {
            400..=499 => {
                warn!(
                    request_id = %request_id,
                    method = "POST",
                    path = %path,
                    status = %status.as_u16(),
                    latency_ms = %latency.as_millis(),
                    "Client error"
                );
            }
            500..=599 => {
                error!(
                    request_id = %request_id,
                    method = "POST",
                    path = %path,
                    status = %status.as_u16(),
                    latency_ms = %latency.as_millis(),
                    "Server error"
                );
            }
            _ => {
                info!(
                    request_id = %request_id,
                    method = "POST",
                    path = %path,
                    status = %status.as_u16(),
                    latency_ms = %latency.as_millis(),
                    "Request completed"
                );
            }
        }

        if status.is_success() {
            parse_body(&bytes).map_err(|source| ApiError::Decode {
                path: path.to_string(),
                source,
            })
        } else {
            Err(ApiError::status_error(path, status, error_body(&bytes)))
        }
    }
}

fn decode<T: DeserializeOwned>(path: &str, value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|source| ApiError::Decode {
        path: path.to_string(),
        source,
    })
}

fn parse_body(bytes: &[u8]) -> Result<Value, serde_json::Error> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(bytes)
}

/// Error bodies are kept even when they are not JSON.
fn error_body(bytes: &[u8]) -> Value {
    parse_body(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}
