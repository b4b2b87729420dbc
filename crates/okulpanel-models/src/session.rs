//! In-memory session state.
//!
//! A session starts in [`SessionState::Loading`] until the stored
//! credentials have been read back, then settles into either
//! [`SessionState::Unauthenticated`] or [`SessionState::Authenticated`].
//! It is authenticated only while both an access token and a role exist.

use serde::Serialize;

use crate::roles::Role;
use crate::users::UserInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Loading,
    Unauthenticated,
    Authenticated,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    pub state: SessionState,
    pub role: Option<Role>,
    pub user: Option<UserInfo>,
    pub school_code: Option<String>,
}

impl Session {
    /// Initial state before storage has been read.
    pub fn loading() -> Self {
        Self {
            state: SessionState::Loading,
            role: None,
            user: None,
            school_code: None,
        }
    }

    pub fn authenticated(role: Role, user: Option<UserInfo>, school_code: Option<String>) -> Self {
        Self {
            state: SessionState::Authenticated,
            role: Some(role),
            user,
            school_code,
        }
    }

    /// Signed-out state. A school code chosen before login survives.
    pub fn unauthenticated(school_code: Option<String>) -> Self {
        Self {
            state: SessionState::Unauthenticated,
            role: None,
            user: None,
            school_code,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state == SessionState::Authenticated
    }

    pub fn is_loading(&self) -> bool {
        self.state == SessionState::Loading
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::loading()
    }
}

/// Fields handed to `set_session`. Every field is optional; only the
/// provided ones are persisted. A blank token counts as not provided.
#[derive(Clone, Default)]
pub struct NewSession {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub role: Option<Role>,
    pub user: Option<UserInfo>,
    pub school_code: Option<String>,
}

impl NewSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = non_blank(token.into());
        self
    }

    pub fn refresh_token(mut self, token: impl Into<String>) -> Self {
        self.refresh_token = non_blank(token.into());
        self
    }

    /// The access token to persist, if one was given and is not blank.
    pub fn given_access_token(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|t| !t.trim().is_empty())
    }

    pub fn given_refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref().filter(|t| !t.trim().is_empty())
    }

    pub fn role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    pub fn user(mut self, user: UserInfo) -> Self {
        self.user = Some(user);
        self
    }

    pub fn school_code(mut self, code: impl Into<String>) -> Self {
        self.school_code = Some(code.into());
        self
    }

    /// Whether applying these fields signs the user in.
    pub fn grants_access(&self) -> bool {
        self.given_access_token().is_some() && self.role.is_some()
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

impl std::fmt::Debug for NewSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewSession")
            .field("has_access_token", &self.given_access_token().is_some())
            .field("has_refresh_token", &self.given_refresh_token().is_some())
            .field("role", &self.role)
            .field("school_code", &self.school_code)
            .finish_non_exhaustive()
    }
}
