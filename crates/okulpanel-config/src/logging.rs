use std::env;
use std::path::PathBuf;

use crate::first_var;

/// Logging configuration.
///
/// # Environment Variables
///
/// - `LOG_LEVEL`: console log level (default: `warn`)
/// - `OKULPANEL_LOG_DIR`: when set, structured JSON logs are also written
///   to a daily-rolling file in this directory
#[derive(Clone, Debug)]
pub struct LogConfig {
    pub level: String,
    pub log_dir: Option<PathBuf>,
}

impl LogConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            level: first_var(&lookup, &["LOG_LEVEL"]).unwrap_or_else(|| "warn".to_string()),
            log_dir: first_var(&lookup, &["OKULPANEL_LOG_DIR"]).map(PathBuf::from),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            log_dir: None,
        }
    }
}
