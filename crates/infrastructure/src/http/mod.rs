//! HTTP infrastructure utilities.
//!
//! This module provides:
//! - Payload encoding of body values for sending
//! - Body values built from received payloads

mod payload;

pub use payload::{EncodedPayload, decode_payload, encode_payload};
