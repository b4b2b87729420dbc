//! # Okulpanel Client
//!
//! HTTP client for the Okulpanel REST API.
//!
//! This crate provides:
//! - [`ApiClient`]: JSON `POST` calls with the stored bearer token attached
//! - One-shot token refresh and replay when the server rejects a token
//! - [`AuthFailureHandler`], invoked when the session cannot be recovered
//! - [`ApiError`] with helpers for status, server message and user-facing text
//!
//! # Example
//!
//! ```ignore
//! use okulpanel_client::ApiClient;
//! use okulpanel_config::ApiConfig;
//! use okulpanel_storage::{MemoryStorage, TokenStore};
//!
//! let store = TokenStore::new(MemoryStorage::new());
//! let client = ApiClient::builder(ApiConfig::from_env()?, store).build();
//! let info: serde_json::Value = client.post("/user/info", &serde_json::json!({})).await?;
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod upload;

pub use auth::AuthFailureHandler;
pub use client::{ApiClient, ApiClientBuilder, REFRESH_PATH};
pub use error::{ApiError, TOKEN_INVALID_MESSAGE};
pub use upload::upload_url;
