//! Bodycodec Infrastructure - Codec engine and adapters
//!
//! This crate provides the concrete body transcoder behind the
//! application layer's `BodyCodec` port, together with payload
//! encoding and settings persistence.

pub mod codec;
pub mod http;
pub mod persistence;
pub mod serialization;

pub use codec::{
    Classified, CodecError, CodecResult, Stage, Transcoder, XmlError, XmlOptions, build_xml,
    is_valid_base64, parse_text, parse_xml,
};
pub use http::{EncodedPayload, decode_payload, encode_payload};
pub use persistence::{SettingsError, SettingsRepository};
pub use serialization::{
    SerializationError, from_json, from_json_bytes, to_json_pretty, to_json_stable,
    to_json_stable_bytes, validate_json,
};
