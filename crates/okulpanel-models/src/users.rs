//! The signed-in user's record.
//!
//! `/user/info` returns a loosely shaped object whose fields depend on the
//! role: teachers carry `OgretmenID`, students and parents carry
//! `OgrenciId` and `Sinif`. The record is stored as-is and read through
//! typed accessors.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ids::RecordId;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserInfo(Map<String, Value>);

impl UserInfo {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Builds a record from a JSON value. Anything but an object yields `None`.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn teacher_id(&self) -> Option<RecordId> {
        self.id_field(&["OgretmenID", "OgretmenId"])
    }

    pub fn student_id(&self) -> Option<RecordId> {
        self.id_field(&["OgrenciId", "OgrenciID"])
    }

    /// Class (`Sinif`) as text; numeric classes are rendered as digits.
    pub fn class_name(&self) -> Option<String> {
        match self.get("Sinif")? {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn full_name(&self) -> Option<&str> {
        self.text_field("AdSoyad")
    }

    /// Photo file name, resolved against the upload base URL by the client.
    pub fn photo(&self) -> Option<&str> {
        self.text_field("Fotograf")
    }

    fn id_field(&self, names: &[&str]) -> Option<RecordId> {
        names
            .iter()
            .filter_map(|name| self.get(name))
            .find_map(RecordId::from_json)
    }

    fn text_field(&self, name: &str) -> Option<&str> {
        self.get(name)
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
    }
}
