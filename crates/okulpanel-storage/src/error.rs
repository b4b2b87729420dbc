/// Error type for storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid value for '{key}': {reason}")]
    Decode { key: &'static str, reason: String },

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}
