//! Shared Serde helpers
//!
//! Default-value functions and custom deserializers for API and
//! file-backed records.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Default value: true
pub fn bool_true() -> bool {
    true
}

/// Default value: false
pub fn bool_false() -> bool {
    false
}

/// Boolean deserializer tolerant of hand-seeded data
///
/// Dataset files mix native booleans with SQLite-style 0/1 flags and
/// string flags ("1"/"0", "true"/"false", "yes"/"no", case-insensitive).
/// An empty string counts as false.
pub fn deserialize_bool_flexible<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Value::deserialize(deserializer)? {
        Value::Bool(b) => Ok(b),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(D::Error::custom(format!(
                "invalid boolean number {}, expected 0 or 1",
                n
            ))),
        },
        Value::String(s) => {
            let t = s.trim();
            if t == "1" || t.eq_ignore_ascii_case("true") || t.eq_ignore_ascii_case("yes") {
                Ok(true)
            } else if t.is_empty()
                || t == "0"
                || t.eq_ignore_ascii_case("false")
                || t.eq_ignore_ascii_case("no")
            {
                Ok(false)
            } else {
                Err(D::Error::custom(format!("invalid boolean value '{}'", s)))
            }
        },
        other => Err(D::Error::custom(format!(
            "invalid boolean: {}, expected bool, 0/1 or a flag string",
            other
        ))),
    }
}

/// Optional integer deserializer that also accepts numeric strings
///
/// `null` and `""` both mean absent; `123` and `"123"` both parse.
pub fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid integer: {}", n))),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .parse::<i64>()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid integer: {}", s))),
        Some(other) => Err(D::Error::custom(format!(
            "invalid integer: {}, expected a number or numeric string",
            other
        ))),
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // unwrap is acceptable in tests
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct TestI64 {
        #[serde(default, deserialize_with = "deserialize_optional_i64")]
        value: Option<i64>,
    }

    #[test]
    fn test_optional_i64_null() {
        let result: TestI64 = serde_json::from_str(r#"{"value": null}"#).unwrap();
        assert_eq!(result.value, None);
    }

    #[test]
    fn test_optional_i64_string_number() {
        let result: TestI64 = serde_json::from_str(r#"{"value": "123"}"#).unwrap();
        assert_eq!(result.value, Some(123));
    }

    #[test]
    fn test_optional_i64_native_number() {
        let result: TestI64 = serde_json::from_str(r#"{"value": 456}"#).unwrap();
        assert_eq!(result.value, Some(456));
    }

    #[test]
    fn test_optional_i64_empty_string() {
        let result: TestI64 = serde_json::from_str(r#"{"value": ""}"#).unwrap();
        assert_eq!(result.value, None);
    }

    #[test]
    fn test_optional_i64_invalid_string() {
        let result: Result<TestI64, _> = serde_json::from_str(r#"{"value": "nope"}"#);
        assert!(result.is_err());
    }

    #[derive(Deserialize)]
    struct TestBool {
        #[serde(deserialize_with = "deserialize_bool_flexible")]
        value: bool,
    }

    #[test]
    fn test_bool_native() {
        let result: TestBool = serde_json::from_str(r#"{"value": true}"#).unwrap();
        assert!(result.value);
    }

    #[test]
    fn test_bool_int() {
        let result: TestBool = serde_json::from_str(r#"{"value": 1}"#).unwrap();
        assert!(result.value);
        let result: TestBool = serde_json::from_str(r#"{"value": 0}"#).unwrap();
        assert!(!result.value);
    }

    #[test]
    fn test_bool_string() {
        let result: TestBool = serde_json::from_str(r#"{"value": "yes"}"#).unwrap();
        assert!(result.value);
        let result: TestBool = serde_json::from_str(r#"{"value": "false"}"#).unwrap();
        assert!(!result.value);
    }

    #[test]
    fn test_bool_invalid() {
        let result: Result<TestBool, _> = serde_json::from_str(r#"{"value": "maybe"}"#);
        assert!(result.is_err());
    }
}
