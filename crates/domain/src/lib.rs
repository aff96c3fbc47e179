//! Bodycodec Domain - Body value types
//!
//! This crate defines the payload model shared by the transcoder and its callers.
//! All types here are pure Rust with no I/O dependencies.

pub mod body;
pub mod error;
pub mod form;
pub mod settings;

pub use body::{BodyType, BodyValue};
pub use error::{DomainError, DomainResult};
pub use form::{FormField, fields_to_json, parse_pair_data};
pub use settings::CodecSettings;
