use okulpanel_models::Theme;
use okulpanel_storage::TokenStore;
use tokio::sync::watch;
use tracing::{debug, instrument};

/// Light/dark preference, persisted across sessions.
#[derive(Debug)]
pub struct ThemeContext {
    store: TokenStore,
    current: watch::Sender<Theme>,
}

impl ThemeContext {
    pub fn new(store: TokenStore) -> Self {
        let (current, _) = watch::channel(Theme::default());
        Self { store, current }
    }

    pub fn current(&self) -> Theme {
        *self.current.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Theme> {
        self.current.subscribe()
    }

    /// Loads the stored preference, defaulting to light.
    #[instrument(skip(self))]
    pub async fn restore(&self) -> Theme {
        let theme = self.store.theme().await.unwrap_or_default();
        self.current.send_replace(theme);
        debug!(theme = %theme, "Theme restored");
        theme
    }

    #[instrument(skip(self))]
    pub async fn set(&self, theme: Theme) {
        self.store.set_theme(Some(theme)).await;
        self.current.send_replace(theme);
    }

    pub async fn toggle(&self) -> Theme {
        let next = self.current().toggled();
        self.set(next).await;
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use okulpanel_storage::MemoryStorage;

    #[tokio::test]
    async fn test_toggle_persists() {
        let store = TokenStore::new(MemoryStorage::new());
        let ctx = ThemeContext::new(store.clone());

        assert_eq!(ctx.restore().await, Theme::Light);
        assert_eq!(ctx.toggle().await, Theme::Dark);
        assert_eq!(store.theme().await, Some(Theme::Dark));

        let fresh = ThemeContext::new(store);
        assert_eq!(fresh.restore().await, Theme::Dark);
    }
}
