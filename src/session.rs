//! Session context.
//!
//! Owns the process-wide [`Session`] and keeps it in step with the token
//! store. Readers take snapshots or subscribe to changes; only the methods
//! here mutate it.

use async_trait::async_trait;
use okulpanel_client::AuthFailureHandler;
use okulpanel_models::{NewSession, Session};
use okulpanel_storage::TokenStore;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

#[derive(Debug)]
pub struct SessionContext {
    store: TokenStore,
    state: watch::Sender<Session>,
}

impl SessionContext {
    /// Creates a context in the loading state. Call [`restore`](Self::restore)
    /// once at startup.
    pub fn new(store: TokenStore) -> Self {
        let (state, _) = watch::channel(Session::loading());
        Self { store, state }
    }

    /// Current session.
    pub fn snapshot(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Receiver that observes every session transition.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// Rebuilds the session from storage.
    ///
    /// Authenticated only if both an access token and a role are stored.
    /// Otherwise a stored school code is kept.
    #[instrument(skip(self))]
    pub async fn restore(&self) -> Session {
        let (token, role, user, school_code) = tokio::join!(
            self.store.access_token(),
            self.store.role(),
            self.store.user(),
            self.store.school_code(),
        );

        let session = match (token, role) {
            (Some(_), Some(role)) => Session::authenticated(role, user, school_code),
            _ => Session::unauthenticated(school_code),
        };

        debug!(state = ?session.state, role = ?session.role, "Session restored");
        self.state.send_replace(session.clone());
        session
    }

    /// Persists the provided fields and updates the session.
    ///
    /// The session becomes authenticated only when both a non-blank access
    /// token and a role are provided. Otherwise only the school code changes.
    #[instrument(skip(self, new))]
    pub async fn set_session(&self, new: NewSession) -> Session {
        if let Some(token) = new.given_access_token() {
            self.store.set_access_token(Some(token)).await;
        }
        if let Some(token) = new.given_refresh_token() {
            self.store.set_refresh_token(Some(token)).await;
        }
        if let Some(role) = new.role {
            self.store.set_role(Some(role)).await;
        }
        if let Some(user) = new.user.as_ref() {
            self.store.set_user(Some(user)).await;
        }
        if let Some(code) = new.school_code.as_deref() {
            self.store.set_school_code(Some(code)).await;
        }

        let grants_access = new.grants_access();
        self.state.send_modify(|session| {
            let school_code = new.school_code.clone().or_else(|| session.school_code.take());
            match (grants_access, new.role) {
                (true, Some(role)) => {
                    *session = Session::authenticated(role, new.user.clone(), school_code);
                }
                _ => session.school_code = school_code,
            }
        });

        let session = self.snapshot();
        info!(
            authenticated = session.is_authenticated(),
            role = ?session.role,
            "Session updated"
        );
        session
    }

    /// Persists and applies a school code without touching authentication.
    #[instrument(skip(self))]
    pub async fn update_school_code(&self, code: Option<&str>) {
        self.store.set_school_code(code).await;
        let code = code.map(str::to_string);
        self.state.send_modify(|session| session.school_code = code);
    }

    /// Deletes the stored credentials, role, user and school code and signs
    /// out. The theme preference is left alone.
    #[instrument(skip(self))]
    pub async fn clear_session(&self) {
        self.store.clear_session_keys().await;
        self.state.send_replace(Session::unauthenticated(None));
        info!("Session cleared");
    }
}

#[async_trait]
impl AuthFailureHandler for SessionContext {
    async fn on_auth_failure(&self) {
        warn!("Stored credentials rejected, signing out");
        self.clear_session().await;
    }
}
