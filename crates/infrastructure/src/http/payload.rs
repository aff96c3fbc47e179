//! HTTP payload encoding and decoding.
//!
//! Bridges body values and the bytes an execution engine sends or receives.

use bodycodec_domain::{BodyValue, FormField};
use mime::Mime;

use crate::codec::{CodecError, base64};

/// Bytes of a body ready to be sent, with their media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPayload {
    /// The payload bytes.
    pub bytes: Vec<u8>,
    /// The `Content-Type` to send, if the body has one.
    pub content_type: Option<Mime>,
}

impl EncodedPayload {
    /// Returns the `Content-Type` header value.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_ref().map(Mime::as_ref)
    }

    /// Returns true if there is nothing to send.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Encodes a body for sending.
///
/// Forms are URL-encoded, skipping disabled and incomplete fields; raw bodies
/// are decoded from Base64.
///
/// # Errors
///
/// Returns an error if a raw body is not valid Base64 or a form cannot be
/// URL-encoded.
pub fn encode_payload(body: &BodyValue) -> Result<EncodedPayload, CodecError> {
    let bytes = match body {
        BodyValue::None => Vec::new(),
        BodyValue::Text(s) | BodyValue::Json(s) | BodyValue::Xml(s) => s.clone().into_bytes(),
        BodyValue::Form(fields) => {
            let pairs: Vec<(&str, &str)> = fields
                .iter()
                .filter(|field| field.is_complete() && !field.is_disabled())
                .map(|field| (field.name.as_str(), field.value.as_str()))
                .collect();
            serde_urlencoded::to_string(pairs)?.into_bytes()
        }
        BodyValue::Raw(s) if s.is_empty() => Vec::new(),
        BodyValue::Raw(s) => base64::decode(s).ok_or(CodecError::InvalidBase64)?,
    };

    Ok(EncodedPayload {
        bytes,
        content_type: body.content_type(),
    })
}

/// Builds a body from received bytes and their `Content-Type` header.
///
/// JSON, XML, text and URL-encoded media types map to the matching body when
/// the bytes are UTF-8. Bytes without a header are treated as text. Anything
/// else, including non-UTF-8 content, becomes a raw body.
#[must_use]
pub fn decode_payload(bytes: &[u8], content_type: Option<&str>) -> BodyValue {
    if bytes.is_empty() {
        return BodyValue::None;
    }
    let Ok(text) = std::str::from_utf8(bytes) else {
        return BodyValue::Raw(base64::encode(bytes));
    };

    let media = content_type.and_then(|header| header.parse::<Mime>().ok());
    let Some(media) = media else {
        return if content_type.is_some() {
            BodyValue::Raw(base64::encode(bytes))
        } else {
            BodyValue::Text(text.to_string())
        };
    };

    if media.subtype() == mime::JSON || media.suffix() == Some(mime::JSON) {
        BodyValue::Json(text.to_string())
    } else if media.subtype() == mime::XML || media.suffix() == Some(mime::XML) {
        BodyValue::Xml(text.to_string())
    } else if media.type_() == mime::APPLICATION && media.subtype() == mime::WWW_FORM_URLENCODED {
        match serde_urlencoded::from_str::<Vec<(String, String)>>(text) {
            Ok(pairs) => BodyValue::Form(
                pairs
                    .into_iter()
                    .map(|(name, value)| FormField::new(name, value))
                    .collect(),
            ),
            Err(e) => {
                tracing::debug!(error = %e, "form payload is not URL-encoded, keeping text");
                BodyValue::Text(text.to_string())
            }
        }
    } else if media.type_() == mime::TEXT || media.subtype() == mime::JAVASCRIPT {
        BodyValue::Text(text.to_string())
    } else {
        BodyValue::Raw(base64::encode(bytes))
    }
}
