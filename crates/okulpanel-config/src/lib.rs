//! # Okulpanel Config
//!
//! Configuration types for the Okulpanel client.
//!
//! This crate provides configuration structures loaded from environment variables:
//!
//! - [`api`]: API and photo upload base URLs
//! - [`storage`]: Location of the local secure store
//! - [`logging`]: Console and file logging settings
//!
//! # Example
//!
//! ```ignore
//! use okulpanel_config::{ApiConfig, LogConfig, StorageConfig};
//!
//! dotenvy::dotenv().ok();
//! let api_config = ApiConfig::from_env()?;
//! let storage_config = StorageConfig::from_env();
//! let log_config = LogConfig::from_env();
//! ```

pub mod api;
pub mod logging;
pub mod storage;

// Re-export commonly used types at crate root
pub use api::{ApiConfig, ConfigError};
pub use logging::LogConfig;
pub use storage::StorageConfig;

/// Reads the first non-empty variable among `keys`.
pub(crate) fn first_var<F>(lookup: &F, keys: &[&str]) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    keys.iter()
        .filter_map(|key| lookup(*key))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}
