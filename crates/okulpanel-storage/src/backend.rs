use async_trait::async_trait;

use crate::error::StorageError;

/// Asynchronous string key-value store.
///
/// Implementations must treat deleting a missing key as success.
#[async_trait]
pub trait SecureStorage: Send + Sync {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    async fn delete_item(&self, key: &str) -> Result<(), StorageError>;
}
