//! Codec error types.

use bodycodec_domain::{BodyType, DomainError};

use crate::serialization::SerializationError;

/// Errors raised while parsing or building XML.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum XmlError {
    /// The underlying parser rejected the document.
    #[error("malformed XML: {0}")]
    Syntax(String),

    /// The document has no root element.
    #[error("XML document has no root element")]
    NoRoot,

    /// The document has more than one top-level element.
    #[error("XML document has more than one root element")]
    MultipleRoots,

    /// Non-whitespace text appears outside the root element.
    #[error("XML document has text outside the root element")]
    TextOutsideRoot,

    /// An element is opened but never closed.
    #[error("XML element <{0}> is not closed")]
    Unclosed(String),

    /// An object whose only key is `item` holds a list, which XML cannot
    /// tell apart from a top-level list.
    #[error("an object holding only an \"item\" list has no distinct XML form")]
    ItemListObject,

    /// A key cannot be used as an element or attribute name.
    #[error("invalid XML name: {0:?}")]
    InvalidName(String),

    /// Writing the document failed.
    #[error("failed to write XML: {0}")]
    Write(String),
}

/// Errors raised by body conversions.
///
/// Every conversion failure names the source body type it was raised for.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The source holds text that is not valid JSON.
    #[error("{source_type} body is not valid JSON: {message}")]
    MalformedJson {
        /// Type of the body being converted.
        source_type: BodyType,
        /// Parser complaint.
        message: String,
    },

    /// The source holds text that is not valid XML.
    #[error("{source_type} body is not valid XML: {source}")]
    MalformedXml {
        /// Type of the body being converted.
        source_type: BodyType,
        /// Parser complaint.
        source: XmlError,
    },

    /// The source content cannot be expressed as an XML document.
    #[error("cannot build XML from {source_type} body: {source}")]
    XmlBuild {
        /// Type of the body being converted.
        source_type: BodyType,
        /// Builder complaint.
        source: XmlError,
    },

    /// The source did not yield a list of name/value pairs.
    #[error("{source_type} body does not describe a list of name/value pairs")]
    NotPairList {
        /// Type of the body being converted.
        source_type: BodyType,
    },

    /// One entry of the pair list is unusable; the whole list is rejected.
    #[error("{source_type} body has an invalid name/value pair: {source}")]
    InvalidPair {
        /// Type of the body being converted.
        source_type: BodyType,
        /// Validation failure.
        source: DomainError,
    },

    /// A raw body is not valid Base64.
    #[error("raw body is not valid Base64")]
    InvalidBase64,

    /// A form body could not be URL-encoded.
    #[error("failed to URL-encode form body: {0}")]
    UrlEncode(#[from] serde_urlencoded::ser::Error),

    /// Serializing the converted value failed.
    #[error(transparent)]
    Serialization(#[from] SerializationError),
}

impl CodecError {
    /// Maps a pair-list validation failure onto the conversion error for
    /// `source_type`.
    #[must_use]
    pub fn from_pair_data(source_type: BodyType, error: DomainError) -> Self {
        match error {
            DomainError::NotPairList => Self::NotPairList { source_type },
            other => Self::InvalidPair {
                source_type,
                source: other,
            },
        }
    }
}

/// Result type alias for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;
