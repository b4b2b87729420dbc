//! # Okulpanel Storage
//!
//! Local secure storage for credentials and session data.
//!
//! This crate provides:
//! - The [`SecureStorage`] backend trait (async string key-value store)
//! - [`MemoryStorage`] and [`FileStorage`] backends
//! - Typed keys with an explicit codec per key ([`keys`])
//! - [`TokenStore`], the facade the rest of the client talks to. It logs
//!   and absorbs backend failures: reads fall back to "absent" and writes
//!   are dropped.
//!
//! # Example
//!
//! ```ignore
//! use okulpanel_storage::{keys, MemoryStorage, TokenStore};
//!
//! let store = TokenStore::new(MemoryStorage::new());
//! store.set::<keys::AccessToken>(Some(&"abc".to_string())).await;
//! let token = store.get::<keys::AccessToken>().await;
//! store.clear_all().await;
//! ```

pub mod backend;
pub mod error;
pub mod file;
pub mod keys;
pub mod memory;
pub mod store;

pub use backend::SecureStorage;
pub use error::StorageError;
pub use file::FileStorage;
pub use keys::StoreKey;
pub use memory::MemoryStorage;
pub use store::TokenStore;
