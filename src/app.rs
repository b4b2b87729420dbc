use std::sync::Arc;

use okulpanel_client::ApiClient;
use okulpanel_config::{ApiConfig, ConfigError, StorageConfig};
use okulpanel_models::Session;
use okulpanel_storage::{FileStorage, SecureStorage, TokenStore};

use crate::session::SessionContext;
use crate::theme::ThemeContext;

/// Application root: the token store and the contexts built on it.
///
/// The session context is registered as the client's auth-failure handler,
/// so a rejected token that cannot be refreshed signs the session out.
#[derive(Clone, Debug)]
pub struct App {
    pub store: TokenStore,
    pub session: Arc<SessionContext>,
    pub theme: Arc<ThemeContext>,
    pub api: ApiClient,
}

impl App {
    pub fn new(api_config: ApiConfig, backend: Arc<dyn SecureStorage>) -> Self {
        Self::with_http_client(api_config, backend, reqwest::Client::new())
    }

    pub fn with_http_client(
        api_config: ApiConfig,
        backend: Arc<dyn SecureStorage>,
        http: reqwest::Client,
    ) -> Self {
        let store = TokenStore::from_arc(backend);
        let session = Arc::new(SessionContext::new(store.clone()));
        let theme = Arc::new(ThemeContext::new(store.clone()));
        let api = ApiClient::builder(api_config, store.clone())
            .http_client(http)
            .auth_failure_handler(session.clone())
            .build();

        Self {
            store,
            session,
            theme,
            api,
        }
    }

    /// Builds the application from environment configuration with a
    /// file-backed store.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_config = ApiConfig::from_env()?;
        let storage = StorageConfig::from_env();
        Ok(Self::new(
            api_config,
            Arc::new(FileStorage::new(storage.store_path())),
        ))
    }

    /// Restores the session and theme from storage.
    pub async fn restore(&self) -> Session {
        let (session, _) = tokio::join!(self.session.restore(), self.theme.restore());
        session
    }
}
