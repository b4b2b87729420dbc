//! Feature services, one per area of the platform.
//!
//! Each service is a unit struct whose associated functions wrap the
//! endpoints of that area and return typed records.

pub mod auth;
pub mod schedule;
pub mod students;
pub mod teachers;
pub mod users;

pub use self::auth::AuthService;
pub use self::schedule::ScheduleService;
pub use self::students::StudentService;
pub use self::teachers::TeacherService;
pub use self::users::UserService;

use okulpanel_client::ApiError;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// Reads a list response. Anything but a JSON array is an empty list.
pub(crate) fn records<T: DeserializeOwned>(path: &str, value: Value) -> Result<Vec<T>, ApiError> {
    match value {
        Value::Array(_) => serde_json::from_value(value).map_err(|source| ApiError::Decode {
            path: path.to_string(),
            source,
        }),
        other => {
            debug!(path = %path, body = %other, "Expected a list, treating as empty");
            Ok(Vec::new())
        }
    }
}
