use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accepts a value sent either as a string (`"2"`) or a number (`2`).
///
/// Empty strings and `null` become `None`.
pub fn deserialize_lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a scalar, got {}",
            other
        ))),
    }
}

/// Accepts a string field, treating an empty string as absent.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.filter(|s| !s.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "deserialize_lenient_string")]
        code: Option<String>,
    }

    #[test]
    fn test_code_from_string_or_number() {
        let a: Holder = serde_json::from_str(r#"{"code": "2"}"#).unwrap();
        let b: Holder = serde_json::from_str(r#"{"code": 2}"#).unwrap();
        let c: Holder = serde_json::from_str(r#"{"code": ""}"#).unwrap();
        let d: Holder = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(a.code.as_deref(), Some("2"));
        assert_eq!(b.code.as_deref(), Some("2"));
        assert_eq!(c.code, None);
        assert_eq!(d.code, None);
    }

    #[test]
    fn test_code_rejects_objects() {
        let result: Result<Holder, _> = serde_json::from_str(r#"{"code": {"x": 1}}"#);
        assert!(result.is_err());
    }
}
