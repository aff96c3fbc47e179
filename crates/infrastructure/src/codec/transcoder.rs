//! Body transcoder.
//!
//! Each `(source, target)` pair is handled on its own path; there is no
//! shared intermediate representation. Converting to the source's own type
//! returns the source unchanged.

use bodycodec_application::BodyCodec;
use bodycodec_domain::{
    BodyType, BodyValue, CodecSettings, FormField, fields_to_json, parse_pair_data,
};
use serde_json::Value;

use super::classifier::{Classified, parse_text};
use super::error::{CodecError, CodecResult};
use super::xml::{XmlOptions, build_xml, parse_xml};
use super::{base64, form};
use crate::serialization::{to_json_pretty, validate_json};

/// Stateless converter between body representations.
#[derive(Debug, Clone, Default)]
pub struct Transcoder {
    settings: CodecSettings,
}

impl Transcoder {
    /// Creates a transcoder with the given output settings.
    #[must_use]
    pub const fn new(settings: CodecSettings) -> Self {
        Self { settings }
    }

    /// Converts `source` to the `target` representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be interpreted as the target
    /// requires; see the individual `to_*` methods.
    pub fn convert(&self, source: &BodyValue, target: BodyType) -> CodecResult<BodyValue> {
        tracing::debug!(source = %source.body_type(), %target, "converting body");
        match target {
            BodyType::None => Ok(self.to_none(source)),
            BodyType::Text => Ok(self.to_text(source)),
            BodyType::Json => self.to_json(source),
            BodyType::Xml => self.to_xml(source),
            BodyType::Form => self.to_form(source),
            BodyType::Raw => self.to_raw(source),
        }
    }

    /// Returns the empty body, whatever the source.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub const fn to_none(&self, _source: &BodyValue) -> BodyValue {
        BodyValue::None
    }

    /// Converts to text.
    ///
    /// String payloads pass through unchanged (raw bodies stay Base64); forms
    /// become `name=value` pairs joined by `, `.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn to_text(&self, source: &BodyValue) -> BodyValue {
        match source {
            BodyValue::None => BodyValue::empty(BodyType::Text),
            BodyValue::Text(_) => source.clone(),
            BodyValue::Json(s) | BodyValue::Xml(s) | BodyValue::Raw(s) => BodyValue::Text(s.clone()),
            BodyValue::Form(fields) => BodyValue::Text(form::fields_to_text(fields)),
        }
    }

    /// Converts to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if an XML source is malformed.
    pub fn to_json(&self, source: &BodyValue) -> CodecResult<BodyValue> {
        let source_type = source.body_type();
        let json = match source {
            BodyValue::Json(_) => return Ok(source.clone()),
            BodyValue::None => String::new(),
            BodyValue::Text(s) | BodyValue::Raw(s) => match parse_text(s, true) {
                Some(classified) => self.stringify(&classified.into_value())?,
                None => String::new(),
            },
            BodyValue::Xml(s) if s.trim().is_empty() => String::new(),
            BodyValue::Xml(s) => {
                let value = parse_xml(s)
                    .map_err(|source| CodecError::MalformedXml { source_type, source })?;
                self.stringify(&value)?
            }
            BodyValue::Form(fields) => self.stringify(&fields_to_json(fields))?,
        };
        Ok(BodyValue::Json(json))
    }

    /// Converts to an XML document.
    ///
    /// # Errors
    ///
    /// Returns an error if a JSON source is malformed or the content has keys
    /// that are not valid XML names.
    pub fn to_xml(&self, source: &BodyValue) -> CodecResult<BodyValue> {
        let source_type = source.body_type();
        let value = match source {
            BodyValue::Xml(_) => return Ok(source.clone()),
            BodyValue::None => None,
            BodyValue::Text(s) | BodyValue::Raw(s) => parse_text(s, true).map(Classified::into_value),
            BodyValue::Json(s) if s.trim().is_empty() => None,
            BodyValue::Json(s) => Some(validate_json(s).map_err(|e| CodecError::MalformedJson {
                source_type,
                message: e.to_string(),
            })?),
            BodyValue::Form(fields) => Some(fields_to_json(fields)),
        };

        let xml = match value {
            Some(value) => build_xml(&value, self.xml_options())
                .map_err(|source| CodecError::XmlBuild { source_type, source })?,
            None => String::new(),
        };
        Ok(BodyValue::Xml(xml))
    }

    /// Converts to name/value pairs.
    ///
    /// The source must parse to a list of objects that each carry a non-empty
    /// `name` and `value`.
    ///
    /// # Errors
    ///
    /// Returns an error if the source is malformed, is not a list, or has an
    /// entry without a usable name or value.
    pub fn to_form(&self, source: &BodyValue) -> CodecResult<BodyValue> {
        let source_type = source.body_type();
        let fields = match source {
            BodyValue::Form(_) => return Ok(source.clone()),
            BodyValue::None => Vec::new(),
            BodyValue::Text(s) | BodyValue::Raw(s) => match parse_text(s, true) {
                None => Vec::new(),
                Some(Classified::Pairs(fields)) => fields,
                Some(Classified::Json(value)) => pairs_from_value(source_type, &value)?,
                Some(Classified::Xml(value)) => pairs_from_xml_value(source_type, &value)?,
                Some(Classified::Text(_)) => return Err(CodecError::NotPairList { source_type }),
            },
            BodyValue::Json(s) if s.trim().is_empty() => Vec::new(),
            BodyValue::Json(s) => {
                let value = validate_json(s).map_err(|e| CodecError::MalformedJson {
                    source_type,
                    message: e.to_string(),
                })?;
                pairs_from_value(source_type, &value)?
            }
            BodyValue::Xml(s) if s.trim().is_empty() => Vec::new(),
            BodyValue::Xml(s) => {
                let value = parse_xml(s)
                    .map_err(|source| CodecError::MalformedXml { source_type, source })?;
                pairs_from_xml_value(source_type, &value)?
            }
        };
        Ok(BodyValue::Form(fields))
    }

    /// Converts to Base64.
    ///
    /// Text that is already valid Base64 is kept as is. JSON and XML whose
    /// content is a single Base64 string yield that string; otherwise their
    /// text is encoded, and blank JSON or XML gives an empty body. Forms are
    /// encoded as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if a form cannot be serialized.
    pub fn to_raw(&self, source: &BodyValue) -> CodecResult<BodyValue> {
        let raw = match source {
            BodyValue::Raw(_) => return Ok(source.clone()),
            BodyValue::None => String::new(),
            BodyValue::Json(s) | BodyValue::Xml(s) if s.trim().is_empty() => String::new(),
            BodyValue::Text(s) if base64::is_valid_base64(s) => s.clone(),
            BodyValue::Text(s) => base64::encode(s),
            BodyValue::Json(s) => match validate_json(s) {
                Ok(Value::String(inner)) if base64::is_valid_base64(&inner) => inner,
                _ => base64::encode(s),
            },
            BodyValue::Xml(s) => match parse_xml(s) {
                Ok(Value::String(inner)) if base64::is_valid_base64(&inner) => inner,
                _ => base64::encode(s),
            },
            BodyValue::Form(fields) => base64::encode(self.stringify(&fields_to_json(fields))?),
        };
        Ok(BodyValue::Raw(raw))
    }

    fn stringify(&self, value: &Value) -> CodecResult<String> {
        Ok(to_json_pretty(value, self.settings.json_indent)?)
    }

    const fn xml_options(&self) -> XmlOptions {
        XmlOptions {
            indent: self.settings.xml_indent,
            declaration: self.settings.xml_declaration,
        }
    }
}

impl BodyCodec for Transcoder {
    type Error = CodecError;

    fn convert(&self, source: &BodyValue, target: BodyType) -> Result<BodyValue, Self::Error> {
        Self::convert(self, source, target)
    }
}

fn pairs_from_value(source_type: BodyType, value: &Value) -> CodecResult<Vec<FormField>> {
    parse_pair_data(value).map_err(|e| CodecError::from_pair_data(source_type, e))
}

/// An empty `<root/>` carries no pairs at all.
fn pairs_from_xml_value(source_type: BodyType, value: &Value) -> CodecResult<Vec<FormField>> {
    match value {
        Value::String(s) if s.is_empty() => Ok(Vec::new()),
        _ => pairs_from_value(source_type, value),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn compact() -> Transcoder {
        Transcoder::new(CodecSettings {
            json_indent: 0,
            xml_indent: 0,
            xml_declaration: false,
        })
    }

    #[test]
    fn test_text_from_form() {
        let body = BodyValue::form(vec![FormField::new("a", "1"), FormField::new("b", "2")]);
        assert_eq!(compact().to_text(&body), BodyValue::text("a=1, b=2"));
    }

    #[test]
    fn test_raw_to_text_is_not_decoded() {
        let body = BodyValue::raw("SGVsbG8=");
        assert_eq!(compact().to_text(&body), BodyValue::text("SGVsbG8="));
    }

    #[test]
    fn test_json_from_text_uses_settings_indent() {
        let body = BodyValue::text(r#"{"a":[1]}"#);
        assert_eq!(
            Transcoder::default().to_json(&body).unwrap(),
            BodyValue::json("{\n  \"a\": [\n    1\n  ]\n}")
        );
        assert_eq!(compact().to_json(&body).unwrap(), BodyValue::json(r#"{"a":[1]}"#));
    }

    #[test]
    fn test_json_from_plain_text_is_a_string() {
        let body = BodyValue::text("hello world");
        assert_eq!(compact().to_json(&body).unwrap(), BodyValue::json(r#""hello world""#));
    }

    #[test]
    fn test_json_from_form() {
        let body = BodyValue::form(vec![FormField::new("a", "1")]);
        assert_eq!(
            compact().to_json(&body).unwrap(),
            BodyValue::json(r#"[{"name":"a","value":"1"}]"#)
        );
    }

    #[test]
    fn test_json_from_xml() {
        let body = BodyValue::xml("<root><a>1</a></root>");
        assert_eq!(compact().to_json(&body).unwrap(), BodyValue::json(r#"{"a":"1"}"#));
    }

    #[test]
    fn test_json_from_malformed_xml_names_source() {
        let err = compact().to_json(&BodyValue::xml("<a>")).unwrap_err();
        assert!(matches!(
            err,
            CodecError::MalformedXml {
                source_type: BodyType::Xml,
                ..
            }
        ));
        assert!(err.to_string().starts_with("XML body is not valid XML"));
    }

    #[test]
    fn test_xml_from_form() {
        let body = BodyValue::form(vec![FormField::new("a", "1"), FormField::new("b", "2")]);
        assert_eq!(
            compact().to_xml(&body).unwrap(),
            BodyValue::xml(
                "<root><item><name>a</name><value>1</value></item>\
                 <item><name>b</name><value>2</value></item></root>"
            )
        );
    }

    #[test]
    fn test_xml_from_malformed_json() {
        let err = compact().to_xml(&BodyValue::json("{oops")).unwrap_err();
        assert!(matches!(
            err,
            CodecError::MalformedJson {
                source_type: BodyType::Json,
                ..
            }
        ));
    }

    #[test]
    fn test_xml_from_json_with_invalid_key() {
        let err = compact()
            .to_xml(&BodyValue::json(r#"{"a": 1, "two words": 2}"#))
            .unwrap_err();
        assert!(matches!(err, CodecError::XmlBuild { .. }));
    }

    #[test]
    fn test_form_from_text_pairs() {
        let body = BodyValue::text("a=1, b=2");
        assert_eq!(
            compact().to_form(&body).unwrap(),
            BodyValue::form(vec![FormField::new("a", "1"), FormField::new("b", "2")])
        );
    }

    #[test]
    fn test_form_from_plain_text_fails() {
        let err = compact().to_form(&BodyValue::text("just words")).unwrap_err();
        assert!(matches!(
            err,
            CodecError::NotPairList {
                source_type: BodyType::Text
            }
        ));
    }

    #[test]
    fn test_form_from_json_rejects_whole_list() {
        let body = BodyValue::json(r#"[{"name":"a","value":"1"},{"name":"b"}]"#);
        let err = compact().to_form(&body).unwrap_err();
        assert!(matches!(
            err,
            CodecError::InvalidPair {
                source_type: BodyType::Json,
                ..
            }
        ));
    }

    #[test]
    fn test_form_from_json_object_is_not_a_list() {
        let err = compact().to_form(&BodyValue::json(r#"{"a":1}"#)).unwrap_err();
        assert!(matches!(
            err,
            CodecError::NotPairList {
                source_type: BodyType::Json
            }
        ));
    }

    #[test]
    fn test_form_from_empty_xml_root() {
        assert_eq!(
            compact().to_form(&BodyValue::xml("<root/>")).unwrap(),
            BodyValue::form(Vec::new())
        );
    }

    #[test]
    fn test_raw_from_text() {
        assert_eq!(
            compact().to_raw(&BodyValue::text("Hello World")).unwrap(),
            BodyValue::raw("SGVsbG8gV29ybGQ=")
        );
        assert_eq!(
            compact().to_raw(&BodyValue::text("SGVsbG8=")).unwrap(),
            BodyValue::raw("SGVsbG8=")
        );
    }

    #[test]
    fn test_raw_from_json_string_holding_base64() {
        assert_eq!(
            compact().to_raw(&BodyValue::json(r#""SGVsbG8=""#)).unwrap(),
            BodyValue::raw("SGVsbG8=")
        );
        assert_eq!(
            compact().to_raw(&BodyValue::json(r#"{"a":1}"#)).unwrap(),
            BodyValue::raw("eyJhIjoxfQ==")
        );
    }

    #[test]
    fn test_raw_from_xml_holding_base64() {
        assert_eq!(
            compact().to_raw(&BodyValue::xml("<root>SGVsbG8=</root>")).unwrap(),
            BodyValue::raw("SGVsbG8=")
        );
        assert_eq!(
            compact().to_raw(&BodyValue::xml("<a>1</a>")).unwrap(),
            BodyValue::raw("PGE+MTwvYT4=")
        );
    }

    #[test]
    fn test_raw_from_form_is_base64_json() {
        let body = BodyValue::form(vec![FormField::new("a", "1")]);
        let BodyValue::Raw(raw) = compact().to_raw(&body).unwrap() else {
            panic!("Expected Raw body");
        };
        let decoded = String::from_utf8(super::base64::decode(&raw).unwrap()).unwrap();
        assert_eq!(decoded, r#"[{"name":"a","value":"1"}]"#);
    }

    #[test]
    fn test_convert_dispatches_through_port() {
        fn switch<C: BodyCodec>(codec: &C, body: &BodyValue) -> BodyValue {
            codec.convert(body, BodyType::Form).unwrap()
        }

        assert_eq!(
            switch(&compact(), &BodyValue::text("a=1")),
            BodyValue::form(vec![FormField::new("a", "1")])
        );
    }
}
