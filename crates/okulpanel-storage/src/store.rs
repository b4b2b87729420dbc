//! Token store facade.
//!
//! Wraps a [`SecureStorage`] backend with typed keys. Backend and codec
//! failures stop here: they are logged and callers see an absent value or a
//! dropped write.

use std::sync::Arc;

use okulpanel_models::{Role, Theme, UserInfo};
use tracing::{debug, error, instrument, warn};

use crate::backend::SecureStorage;
use crate::error::StorageError;
use crate::keys::{self, StoreKey};

#[derive(Clone)]
pub struct TokenStore {
    backend: Arc<dyn SecureStorage>,
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore").finish_non_exhaustive()
    }
}

impl TokenStore {
    pub fn new<S>(backend: S) -> Self
    where
        S: SecureStorage + 'static,
    {
        Self {
            backend: Arc::new(backend),
        }
    }

    pub fn from_arc(backend: Arc<dyn SecureStorage>) -> Self {
        Self { backend }
    }

    /// Reads a key.
    ///
    /// Returns `None` if the key is absent, the backend fails, or the stored
    /// value does not decode.
    #[instrument(skip(self), fields(store.operation = "GET", store.key = K::NAME))]
    pub async fn get<K: StoreKey>(&self) -> Option<K::Value> {
        match self.backend.get_item(K::NAME).await {
            Ok(Some(raw)) => match K::decode(&raw) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!(store.key = K::NAME, error = %e, "Discarding undecodable stored value");
                    None
                }
            },
            Ok(None) => {
                debug!(store.key = K::NAME, "Key absent");
                None
            }
            Err(e) => {
                error!(store.key = K::NAME, error = %e, "Storage read failed");
                None
            }
        }
    }

    /// Writes a key, or deletes it when `value` is `None`.
    #[instrument(skip(self, value), fields(store.operation = "SET", store.key = K::NAME))]
    pub async fn set<K: StoreKey>(&self, value: Option<&K::Value>) {
        let result = match value {
            Some(value) => self.write::<K>(value).await,
            None => self.backend.delete_item(K::NAME).await,
        };

        if let Err(e) = result {
            error!(store.key = K::NAME, error = %e, "Storage write failed");
        }
    }

    pub async fn remove<K: StoreKey>(&self) {
        self.set::<K>(None).await;
    }

    async fn write<K: StoreKey>(&self, value: &K::Value) -> Result<(), StorageError> {
        let raw = K::encode(value)?;
        self.backend.set_item(K::NAME, &raw).await?;
        debug!(store.key = K::NAME, "Key written");
        Ok(())
    }

    /// Deletes every persisted key, theme included.
    #[instrument(skip(self), fields(store.operation = "CLEAR"))]
    pub async fn clear_all(&self) {
        self.delete_names(&keys::ALL_KEYS).await;
    }

    /// Deletes the credentials, role, user and school code. The theme stays.
    #[instrument(skip(self), fields(store.operation = "CLEAR_SESSION"))]
    pub async fn clear_session_keys(&self) {
        self.delete_names(&keys::SESSION_KEYS).await;
    }

    async fn delete_names(&self, names: &[&'static str]) {
        for name in names {
            if let Err(e) = self.backend.delete_item(name).await {
                error!(store.key = *name, error = %e, "Storage delete failed");
            }
        }
    }

    pub async fn access_token(&self) -> Option<String> {
        self.get::<keys::AccessToken>().await
    }

    pub async fn set_access_token(&self, token: Option<&str>) {
        self.set::<keys::AccessToken>(token.map(str::to_string).as_ref())
            .await;
    }

    pub async fn refresh_token(&self) -> Option<String> {
        self.get::<keys::RefreshToken>().await
    }

    pub async fn set_refresh_token(&self, token: Option<&str>) {
        self.set::<keys::RefreshToken>(token.map(str::to_string).as_ref())
            .await;
    }

    pub async fn school_code(&self) -> Option<String> {
        self.get::<keys::SchoolCode>().await
    }

    pub async fn set_school_code(&self, code: Option<&str>) {
        self.set::<keys::SchoolCode>(code.map(str::to_string).as_ref())
            .await;
    }

    pub async fn role(&self) -> Option<Role> {
        self.get::<keys::Role>().await
    }

    pub async fn set_role(&self, role: Option<Role>) {
        self.set::<keys::Role>(role.as_ref()).await;
    }

    pub async fn user(&self) -> Option<UserInfo> {
        self.get::<keys::User>().await
    }

    pub async fn set_user(&self, user: Option<&UserInfo>) {
        self.set::<keys::User>(user).await;
    }

    pub async fn theme(&self) -> Option<Theme> {
        self.get::<keys::Theme>().await
    }

    pub async fn set_theme(&self, theme: Option<Theme>) {
        self.set::<keys::Theme>(theme.as_ref()).await;
    }
}
