use std::env;
use std::path::PathBuf;

use crate::first_var;

/// File name of the secure store inside the data directory.
pub const STORE_FILE_NAME: &str = "secure-store.json";

/// Local storage configuration.
///
/// # Environment Variables
///
/// - `OKULPANEL_DATA_DIR`: directory holding the secure store (default: `.okulpanel`)
#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = first_var(&lookup, &["OKULPANEL_DATA_DIR"])
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(".okulpanel"));

        Self { data_dir }
    }

    /// Path of the store file.
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(STORE_FILE_NAME)
    }
}
