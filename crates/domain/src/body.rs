//! Request/response body types.
//!
//! A [`BodyValue`] is the payload of a request or response in one of six
//! representations. On the wire it is a discriminated union with a `type`
//! field and, except for `None`, a `data` field.

use std::fmt;
use std::str::FromStr;

use mime::Mime;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::form::FormField;

/// The representation tag of a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BodyType {
    /// No body.
    #[default]
    None,
    /// Opaque text.
    Text,
    /// A JSON document.
    #[serde(rename = "JSON")]
    Json,
    /// An XML document.
    #[serde(rename = "XML")]
    Xml,
    /// Name/value pairs.
    Form,
    /// Base64-encoded bytes.
    Raw,
}

impl BodyType {
    /// All body types, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::None,
        Self::Text,
        Self::Json,
        Self::Xml,
        Self::Form,
        Self::Raw,
    ];

    /// Returns the wire literal of this tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Text => "Text",
            Self::Json => "JSON",
            Self::Xml => "XML",
            Self::Form => "Form",
            Self::Raw => "Raw",
        }
    }
}

impl fmt::Display for BodyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BodyType {
    type Err = DomainError;

    /// Parses a wire literal, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::UnknownBodyType(s.to_string()))
    }
}

/// A request or response payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", content = "data")]
pub enum BodyValue {
    /// No body.
    #[default]
    None,
    /// Plain text with no implied structure.
    Text(String),
    /// JSON text. May be invalid when supplied by a caller.
    #[serde(rename = "JSON")]
    Json(String),
    /// XML text with a single root element.
    #[serde(rename = "XML")]
    Xml(String),
    /// Ordered name/value pairs.
    Form(Vec<FormField>),
    /// Base64 text representing arbitrary bytes.
    Raw(String),
}

impl BodyValue {
    /// Creates a text body.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    /// Creates a JSON body.
    #[must_use]
    pub fn json(content: impl Into<String>) -> Self {
        Self::Json(content.into())
    }

    /// Creates an XML body.
    #[must_use]
    pub fn xml(content: impl Into<String>) -> Self {
        Self::Xml(content.into())
    }

    /// Creates a form body.
    #[must_use]
    pub const fn form(fields: Vec<FormField>) -> Self {
        Self::Form(fields)
    }

    /// Creates a raw body from Base64 text.
    #[must_use]
    pub fn raw(base64: impl Into<String>) -> Self {
        Self::Raw(base64.into())
    }

    /// Returns the canonical empty value for a tag: `""` for string
    /// payloads and `[]` for forms.
    #[must_use]
    pub const fn empty(body_type: BodyType) -> Self {
        match body_type {
            BodyType::None => Self::None,
            BodyType::Text => Self::Text(String::new()),
            BodyType::Json => Self::Json(String::new()),
            BodyType::Xml => Self::Xml(String::new()),
            BodyType::Form => Self::Form(Vec::new()),
            BodyType::Raw => Self::Raw(String::new()),
        }
    }

    /// Returns the representation tag.
    #[must_use]
    pub const fn body_type(&self) -> BodyType {
        match self {
            Self::None => BodyType::None,
            Self::Text(_) => BodyType::Text,
            Self::Json(_) => BodyType::Json,
            Self::Xml(_) => BodyType::Xml,
            Self::Form(_) => BodyType::Form,
            Self::Raw(_) => BodyType::Raw,
        }
    }

    /// Returns the string payload, if this variant carries one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) | Self::Json(s) | Self::Xml(s) | Self::Raw(s) => Some(s),
            Self::None | Self::Form(_) => None,
        }
    }

    /// Returns whether the body is none or carries no content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::None => true,
            Self::Text(s) | Self::Json(s) | Self::Xml(s) | Self::Raw(s) => s.is_empty(),
            Self::Form(fields) => fields.is_empty(),
        }
    }

    /// Returns the media type this body is sent with, if any.
    #[must_use]
    pub fn content_type(&self) -> Option<Mime> {
        match self {
            Self::None => None,
            Self::Text(_) => Some(mime::TEXT_PLAIN_UTF_8),
            Self::Json(_) => Some(mime::APPLICATION_JSON),
            Self::Xml(_) => Some(mime::TEXT_XML),
            Self::Form(_) => Some(mime::APPLICATION_WWW_FORM_URLENCODED),
            Self::Raw(_) => Some(mime::APPLICATION_OCTET_STREAM),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_body_type_round_trips_through_display() {
        for tag in BodyType::ALL {
            assert_eq!(tag.to_string().parse::<BodyType>().unwrap(), tag);
        }
    }

    #[test]
    fn test_body_type_parse_ignores_case() {
        assert_eq!("json".parse::<BodyType>().unwrap(), BodyType::Json);
        assert_eq!(" xml ".parse::<BodyType>().unwrap(), BodyType::Xml);
        assert_eq!(
            "yaml".parse::<BodyType>(),
            Err(DomainError::UnknownBodyType("yaml".to_string()))
        );
    }

    #[test]
    fn test_empty_values_match_their_tag() {
        for tag in BodyType::ALL {
            let body = BodyValue::empty(tag);
            assert_eq!(body.body_type(), tag);
            assert!(body.is_empty());
        }
    }

    #[test]
    fn test_content_type() {
        assert_eq!(BodyValue::None.content_type(), None);
        assert_eq!(
            BodyValue::json("{}").content_type(),
            Some(mime::APPLICATION_JSON)
        );
        assert_eq!(
            BodyValue::form(Vec::new()).content_type(),
            Some(mime::APPLICATION_WWW_FORM_URLENCODED)
        );
    }

    #[test]
    fn test_as_str() {
        assert_eq!(BodyValue::raw("QQ==").as_str(), Some("QQ=="));
        assert_eq!(BodyValue::None.as_str(), None);
        assert_eq!(BodyValue::form(Vec::new()).as_str(), None);
    }
}
