//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and the codec engine.
//! Each port is a trait implemented by adapters in the infrastructure layer.

mod body_codec;

pub use body_codec::BodyCodec;
