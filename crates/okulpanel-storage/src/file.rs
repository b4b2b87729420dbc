//! File-backed storage.
//!
//! All keys live in one JSON object file. Every write goes to a fresh sibling
//! temp file that is then renamed over the store, so a crash never leaves a
//! half-written store behind. On Unix both files are readable by their owner
//! only from the moment they are created.
//!
//! A store file that no longer parses is moved aside to `<name>.corrupt` on
//! the next write, and the write starts from an empty store.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

use crate::backend::SecureStorage;
use crate::error::StorageError;

#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStorage {
    /// Uses `path` as the store file. Parent directories are created on the
    /// first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where a store file that fails to parse is moved.
    pub fn corrupt_path(&self) -> PathBuf {
        self.sibling(".corrupt")
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("store"));
        name.push(suffix);
        self.path.with_file_name(name)
    }

    async fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match fs::read(&self.path).await {
            Ok(bytes) if bytes.is_empty() => Ok(BTreeMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn persist(&self, items: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let tmp_path = self.sibling(&format!(".{}.tmp", uuid::Uuid::new_v4().simple()));
        let bytes = serde_json::to_vec_pretty(items)?;
        let written = match write_new_file(&tmp_path, &bytes).await {
            Ok(()) => fs::rename(&tmp_path, &self.path).await.map_err(StorageError::from),
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            if let Err(cleanup) = fs::remove_file(&tmp_path).await {
                debug!(store.path = %tmp_path.display(), error = %cleanup, "Temp file not removed");
            }
            return Err(e);
        }

        debug!(store.path = %self.path.display(), store.entries = items.len(), "Store file written");
        Ok(())
    }

    /// Moves an unreadable store file out of the way so writes can proceed.
    async fn set_aside_corrupt(&self, reason: &serde_json::Error) {
        let backup = self.corrupt_path();
        warn!(
            store.path = %self.path.display(),
            store.backup = %backup.display(),
            error = %reason,
            "Store file is corrupt, starting from an empty store"
        );
        if let Err(e) = fs::rename(&self.path, &backup).await {
            warn!(store.path = %self.path.display(), error = %e, "Corrupt store file not moved");
        }
    }

    async fn modify<F>(&self, change: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut BTreeMap<String, String>) -> bool,
    {
        let _guard = self.write_lock.lock().await;
        let mut items = match self.load().await {
            Ok(items) => items,
            Err(StorageError::Serialization(e)) => {
                self.set_aside_corrupt(&e).await;
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        if change(&mut items) {
            self.persist(&items).await?;
        }
        Ok(())
    }
}

/// Creates `path`, which must not exist yet, and writes `bytes` to it.
async fn write_new_file(path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await?;
    Ok(())
}

#[async_trait]
impl SecureStorage for FileStorage {
    #[instrument(skip(self), fields(store.operation = "GET"))]
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load().await?.remove(key))
    }

    #[instrument(skip(self, value), fields(store.operation = "SET"))]
    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.modify(|items| {
            items.insert(key.to_string(), value.to_string());
            true
        })
        .await
    }

    #[instrument(skip(self), fields(store.operation = "DEL"))]
    async fn delete_item(&self, key: &str) -> Result<(), StorageError> {
        self.modify(|items| items.remove(key).is_some()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let storage = FileStorage::new(&path);
        storage.set_item("accessToken", "abc").await.unwrap();
        storage.set_item("role", "teacher").await.unwrap();

        let reopened = FileStorage::new(&path);
        assert_eq!(
            reopened.get_item("accessToken").await.unwrap().as_deref(),
            Some("abc")
        );
        assert_eq!(reopened.get_item("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_missing_key_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("store.json"));
        storage.delete_item("user").await.unwrap();
        assert!(!storage.path().exists());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, b"{not json").unwrap();

        let storage = FileStorage::new(&path);
        assert!(matches!(
            storage.get_item("role").await,
            Err(StorageError::Serialization(_))
        ));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_replaced_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, b"{trunc").unwrap();

        let storage = FileStorage::new(&path);
        storage.set_item("schoolCode", "AHUIHO").await.unwrap();

        assert_eq!(
            storage.get_item("schoolCode").await.unwrap().as_deref(),
            Some("AHUIHO")
        );
        assert_eq!(storage.get_item("role").await.unwrap(), None);
        assert_eq!(
            std::fs::read(storage.corrupt_path()).unwrap(),
            b"{trunc".to_vec()
        );
    }

    #[tokio::test]
    async fn test_delete_on_corrupt_file_unblocks_reads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, b"[1, 2").unwrap();

        let storage = FileStorage::new(&path);
        storage.delete_item("accessToken").await.unwrap();

        assert_eq!(storage.get_item("accessToken").await.unwrap(), None);
        assert!(storage.corrupt_path().exists());
    }

    #[tokio::test]
    async fn test_writes_leave_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let storage = FileStorage::new(&path);

        storage.set_item("accessToken", "a").await.unwrap();
        storage.set_item("refreshToken", "r").await.unwrap();
        storage.delete_item("accessToken").await.unwrap();

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, ["store.json"]);
    }

    #[tokio::test]
    async fn test_concurrent_writers_on_one_file_all_land() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let first = FileStorage::new(&path);
        let second = FileStorage::new(&path);

        let (a, b) = tokio::join!(
            first.set_item("accessToken", "a"),
            second.set_item("theme", "dark")
        );
        a.unwrap();
        b.unwrap();

        // separate instances do not share a lock, but never share a temp file
        let reopened = FileStorage::new(&path);
        assert!(reopened.get_item("accessToken").await.is_ok());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        FileStorage::new(&path).set_item("k", "v").await.unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_existing_readable_file_is_replaced_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, b"{}").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        FileStorage::new(&path).set_item("k", "v").await.unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
