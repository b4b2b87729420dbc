//! Typed storage keys.
//!
//! Each key names its storage slot and owns the codec between its value type
//! and the stored string. Token and school-code values are stored raw, role
//! and theme by name, and the user record as JSON.

use okulpanel_models::{Role as RoleValue, Theme as ThemeValue, UserInfo};

use crate::error::StorageError;

pub trait StoreKey {
    const NAME: &'static str;

    type Value;

    fn encode(value: &Self::Value) -> Result<String, StorageError>;

    fn decode(raw: &str) -> Result<Self::Value, StorageError>;
}

/// Every persisted key.
pub const ALL_KEYS: [&str; 6] = [
    AccessToken::NAME,
    RefreshToken::NAME,
    SchoolCode::NAME,
    Role::NAME,
    User::NAME,
    Theme::NAME,
];

/// Keys removed when a session ends. The theme preference outlives sessions.
pub const SESSION_KEYS: [&str; 5] = [
    AccessToken::NAME,
    RefreshToken::NAME,
    Role::NAME,
    User::NAME,
    SchoolCode::NAME,
];

/// Values written by older clients may be JSON-quoted strings.
fn unquote(raw: &str) -> String {
    match serde_json::from_str::<String>(raw) {
        Ok(inner) => inner,
        Err(_) => raw.to_string(),
    }
}

macro_rules! raw_string_key {
    ($(#[$meta:meta])* $name:ident, $slot:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name;

        impl StoreKey for $name {
            const NAME: &'static str = $slot;

            type Value = String;

            fn encode(value: &String) -> Result<String, StorageError> {
                Ok(value.clone())
            }

            fn decode(raw: &str) -> Result<String, StorageError> {
                if raw.trim().is_empty() {
                    return Err(StorageError::Decode {
                        key: $slot,
                        reason: "empty value".to_string(),
                    });
                }
                Ok(raw.to_string())
            }
        }
    };
}

raw_string_key!(
    /// Bearer token attached to API requests.
    AccessToken,
    "accessToken"
);
raw_string_key!(
    /// Token exchanged at `/auth/refresh` for a new access token.
    RefreshToken,
    "refreshToken"
);
raw_string_key!(SchoolCode, "schoolCode");

#[derive(Debug, Clone, Copy)]
pub struct Role;

impl StoreKey for Role {
    const NAME: &'static str = "role";

    type Value = RoleValue;

    fn encode(value: &RoleValue) -> Result<String, StorageError> {
        Ok(value.as_str().to_string())
    }

    fn decode(raw: &str) -> Result<RoleValue, StorageError> {
        unquote(raw)
            .parse::<RoleValue>()
            .map_err(|e| StorageError::Decode {
                key: Self::NAME,
                reason: e.to_string(),
            })
    }
}

/// The `/user/info` record of the signed-in user.
#[derive(Debug, Clone, Copy)]
pub struct User;

impl StoreKey for User {
    const NAME: &'static str = "user";

    type Value = UserInfo;

    fn encode(value: &UserInfo) -> Result<String, StorageError> {
        Ok(serde_json::to_string(value)?)
    }

    fn decode(raw: &str) -> Result<UserInfo, StorageError> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        UserInfo::from_value(value).ok_or(StorageError::Decode {
            key: Self::NAME,
            reason: "expected a JSON object".to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Theme;

impl StoreKey for Theme {
    const NAME: &'static str = "theme";

    type Value = ThemeValue;

    fn encode(value: &ThemeValue) -> Result<String, StorageError> {
        Ok(value.as_str().to_string())
    }

    fn decode(raw: &str) -> Result<ThemeValue, StorageError> {
        unquote(raw)
            .parse::<ThemeValue>()
            .map_err(|reason| StorageError::Decode {
                key: Self::NAME,
                reason,
            })
    }
}
