//! Name/value pairs carried by form bodies.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{DomainError, DomainResult};

/// A single name/value pair of a form body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FormField {
    /// Field name.
    pub name: String,
    /// Field value.
    pub value: String,
    /// Whether the field is switched off in the editor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
}

impl FormField {
    /// Creates an enabled field.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            disabled: None,
        }
    }

    /// Marks the field as disabled or enabled.
    #[must_use]
    pub const fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = Some(disabled);
        self
    }

    /// Returns true if the field is disabled.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled.unwrap_or(false)
    }

    /// Returns true if both name and value are non-empty.
    ///
    /// Incomplete fields are skipped whenever a form is serialized.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.value.is_empty()
    }

    /// Converts the field to a `{name, value}` JSON object.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        object.insert("name".to_string(), Value::String(self.name.clone()));
        object.insert("value".to_string(), Value::String(self.value.clone()));
        if let Some(disabled) = self.disabled {
            object.insert("disabled".to_string(), Value::Bool(disabled));
        }
        Value::Object(object)
    }

    /// Reads a field from one entry of a pair list.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPair` if the entry is not an object or lacks a truthy
    /// `name` or `value`.
    pub fn from_json(index: usize, item: &Value) -> DomainResult<Self> {
        let Value::Object(object) = item else {
            return Err(DomainError::invalid_pair(index, "entry is not an object"));
        };

        let name = object
            .get("name")
            .and_then(truthy_string)
            .ok_or_else(|| DomainError::invalid_pair(index, "missing name"))?;
        let value = object
            .get("value")
            .and_then(truthy_string)
            .ok_or_else(|| DomainError::invalid_pair(index, "missing value"))?;
        let disabled = object.get("disabled").and_then(|flag| match flag {
            Value::Bool(b) => Some(*b),
            Value::String(s) => s.parse().ok(),
            _ => None,
        });

        Ok(Self {
            name,
            value,
            disabled,
        })
    }
}

/// Converts complete fields to a JSON array of `{name, value}` objects.
#[must_use]
pub fn fields_to_json(fields: &[FormField]) -> Value {
    Value::Array(
        fields
            .iter()
            .filter(|field| field.is_complete())
            .map(FormField::to_json)
            .collect(),
    )
}

/// Validates a parsed document as a list of name/value pairs.
///
/// The whole list is rejected if any single entry is invalid.
///
/// # Errors
///
/// Returns `NotPairList` if the value is not an array, or `InvalidPair` for
/// the first entry without a truthy `name` and `value`.
pub fn parse_pair_data(data: &Value) -> DomainResult<Vec<FormField>> {
    let Value::Array(items) = data else {
        return Err(DomainError::NotPairList);
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| FormField::from_json(index, item))
        .collect()
}

// Scalars count the way a loosely typed document would see them: empty
// strings, zero and false are not usable.
fn truthy_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64().is_some_and(|f| f != 0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}
