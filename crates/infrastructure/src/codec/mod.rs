//! Body codec engine.
//!
//! Converts body values between the six representations:
//! - [`transcoder`]: dispatch on `(source, target)` pairs
//! - [`classifier`]: heuristic interpretation of untyped text
//! - [`base64`], [`xml`], [`form`]: structural encoders and parsers

pub mod base64;
pub mod classifier;
mod error;
pub mod form;
pub mod transcoder;
pub mod xml;

pub use self::base64::is_valid_base64;
pub use classifier::{Classified, Stage, parse_text};
pub use error::{CodecError, CodecResult, XmlError};
pub use transcoder::Transcoder;
pub use xml::{XmlOptions, build_xml, parse_xml};
