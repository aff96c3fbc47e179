//! JSON serialization helpers for deterministic output.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Error type for serialization operations.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// JSON deserialization failed.
    #[error("JSON deserialization failed: {0}")]
    Deserialize(serde_json::Error),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Serializes a value to deterministic JSON.
///
/// Output format:
/// - 2-space indentation
/// - Trailing newline
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_stable<T: Serialize>(value: &T) -> Result<String, SerializationError> {
    let mut json = to_json_pretty(value, 2)?;
    json.push('\n'); // Trailing newline
    Ok(json)
}

/// Serializes a value to deterministic JSON bytes.
///
/// Same as `to_json_stable` but returns bytes for direct file writing.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_stable_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, SerializationError> {
    let json = to_json_stable(value)?;
    Ok(json.into_bytes())
}

/// Serializes a value with `indent` spaces per level and no trailing newline.
///
/// An indent of zero produces compact single-line JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_pretty<T: Serialize>(value: &T, indent: usize) -> Result<String, SerializationError> {
    if indent == 0 {
        return Ok(serde_json::to_string(value)?);
    }

    let indent = vec![b' '; indent];
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(&indent);
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;

    Ok(String::from_utf8(buffer)?)
}

/// Deserializes JSON from a string.
///
/// Handles both pretty-printed and minified JSON.
///
/// # Errors
///
/// Returns an error if the JSON is invalid or doesn't match the expected type.
pub fn from_json<T: DeserializeOwned>(json: &str) -> Result<T, SerializationError> {
    serde_json::from_str(json).map_err(SerializationError::Deserialize)
}

/// Deserializes JSON from bytes.
///
/// # Errors
///
/// Returns an error if the JSON is invalid or doesn't match the expected type.
pub fn from_json_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SerializationError> {
    serde_json::from_slice(bytes).map_err(SerializationError::Deserialize)
}

/// Strictly parses a JSON document without deserializing to a specific type.
///
/// Leading and trailing whitespace is allowed; anything else after the
/// document is not.
///
/// # Errors
///
/// Returns an error if the JSON is invalid.
pub fn validate_json(json: &str) -> Result<serde_json::Value, SerializationError> {
    serde_json::from_str(json).map_err(SerializationError::Deserialize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[test]
    fn test_stable_serialization_has_trailing_newline() {
        let mut map = BTreeMap::new();
        map.insert("z_key", "value1");
        map.insert("a_key", "value2");

        let json = to_json_stable(&map).expect("serialization should work");
        assert!(json.ends_with('\n'));
    }

    #[test]
    fn test_pretty_uses_requested_indent() {
        let value = json!({"key": ["a"]});

        let two = to_json_pretty(&value, 2).expect("serialization should work");
        assert_eq!(two, "{\n  \"key\": [\n    \"a\"\n  ]\n}");

        let four = to_json_pretty(&value, 4).expect("serialization should work");
        assert!(four.contains("    \"key\""));
    }

    #[test]
    fn test_pretty_with_zero_indent_is_compact() {
        let json = to_json_pretty(&json!({"a": 1, "b": [true]}), 0).expect("serialization should work");
        assert_eq!(json, r#"{"a":1,"b":[true]}"#);
    }

    #[test]
    fn test_object_key_order_is_preserved() {
        let value = validate_json(r#"{"zebra": 1, "apple": 2}"#).expect("valid json");
        let json = to_json_pretty(&value, 0).expect("serialization should work");
        assert_eq!(json, r#"{"zebra":1,"apple":2}"#);
    }

    #[test]
    fn test_roundtrip_serialization() {
        let mut original = BTreeMap::new();
        original.insert("key".to_string(), "value".to_string());

        let json = to_json_stable(&original).expect("serialization should work");
        let restored: BTreeMap<String, String> =
            from_json(&json).expect("deserialization should work");

        assert_eq!(original, restored);
    }

    #[test]
    fn test_validate_json_accepts_scalars() {
        assert_eq!(validate_json(" 123 ").expect("valid json"), json!(123));
        assert_eq!(validate_json("\"text\"").expect("valid json"), json!("text"));
    }

    #[test]
    fn test_validate_json_invalid() {
        assert!(validate_json(r#"{"invalid": }"#).is_err());
        assert!(validate_json("{} trailing").is_err());
        assert!(validate_json("").is_err());
    }
}
