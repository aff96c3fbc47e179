//! Heuristic classification of untyped text.
//!
//! Stages run in a fixed order and the first one that recognises the text
//! wins: Base64, JSON, XML, name/value pairs. Text no stage recognises is
//! returned unchanged.

use bodycodec_domain::{FormField, fields_to_json};
use serde_json::Value;

use super::{base64, form, xml};
use crate::serialization::validate_json;

/// The interpretation chosen for a piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classified {
    /// A JSON document.
    Json(Value),
    /// An XML document, as a value tree.
    Xml(Value),
    /// Name/value pairs.
    Pairs(Vec<FormField>),
    /// Opaque text, including Base64 whose decoding has no structure.
    Text(String),
}

impl Classified {
    /// Returns a short lowercase label for the interpretation.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Json(_) => "json",
            Self::Xml(_) => "xml",
            Self::Pairs(_) => "pairs",
            Self::Text(_) => "text",
        }
    }

    /// Converts the interpretation to a plain value tree.
    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::Json(value) | Self::Xml(value) => value,
            Self::Pairs(fields) => fields_to_json(&fields),
            Self::Text(text) => Value::String(text),
        }
    }
}

/// One step of the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Canonical Base64 whose decoded text is classified in turn.
    Base64,
    /// A strict JSON document.
    Json,
    /// A single-rooted XML document.
    Xml,
    /// `name=value` pairs separated by commas.
    Pairs,
}

impl Stage {
    /// Stages in precedence order.
    pub const ORDER: [Self; 4] = [Self::Base64, Self::Json, Self::Xml, Self::Pairs];

    /// Runs this stage alone, returning `None` if it does not recognise `text`.
    #[must_use]
    pub fn attempt(self, text: &str) -> Option<Classified> {
        match self {
            Self::Base64 => {
                let bytes = base64::decode(text)?;
                let Ok(decoded) = String::from_utf8(bytes) else {
                    return Some(Classified::Text(text.to_string()));
                };
                match parse_text(&decoded, false) {
                    Some(Classified::Text(plain)) if plain == decoded => {
                        Some(Classified::Text(text.to_string()))
                    }
                    None => Some(Classified::Text(text.to_string())),
                    richer => richer,
                }
            }
            Self::Json => validate_json(text).ok().map(Classified::Json),
            Self::Xml => xml::parse_xml(text).ok().map(Classified::Xml),
            Self::Pairs => form::parse_pairs(text).map(Classified::Pairs),
        }
    }
}

/// Classifies `source`, returning `None` for empty input.
///
/// With `check_base64` set, canonical Base64 is decoded and its content
/// classified; when the decoded text has no structure the original Base64
/// text is returned as opaque text.
#[must_use]
pub fn parse_text(source: &str, check_base64: bool) -> Option<Classified> {
    if source.is_empty() {
        return None;
    }

    for stage in Stage::ORDER {
        if stage == Stage::Base64 && !check_base64 {
            continue;
        }
        if let Some(classified) = stage.attempt(source) {
            tracing::debug!(?stage, kind = classified.kind(), "classified text");
            return Some(classified);
        }
        tracing::trace!(?stage, "stage did not match");
    }

    Some(Classified::Text(source.to_string()))
}
