//! Record identifiers.
//!
//! The platform is inconsistent about identifier types: the same
//! `OgrenciId` may arrive as `42` from one endpoint and `"42"` from another.
//! [`RecordId`] keeps whatever form the server sent so that echoing it back
//! in a request body preserves the original JSON type.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl RecordId {
    /// Numeric value, parsing textual ids when possible.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            RecordId::Number(n) => Some(*n),
            RecordId::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Reads an id from an arbitrary JSON value. Empty strings are not ids.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => n.as_i64().map(RecordId::Number),
            serde_json::Value::String(s) if !s.trim().is_empty() => {
                Some(RecordId::Text(s.clone()))
            }
            _ => None,
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId::Number(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId::Text(value.to_string())
    }
}
