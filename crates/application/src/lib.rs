//! Bodycodec Application - Use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits (interfaces implemented by the codec engine)
//! - Use case orchestration
//! - Application-level error handling

pub mod error;
pub mod ports;
pub mod use_cases;

pub use error::{ApplicationError, ApplicationResult};
pub use ports::BodyCodec;
pub use use_cases::{ConvertBody, ConvertBodyInput, ConvertBodyOutput, SwitchBodyRepresentation};
