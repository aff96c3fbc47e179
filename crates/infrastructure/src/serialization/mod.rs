//! JSON serialization helpers.
//!
//! Two flavours of output are produced:
//! - stable files (settings): 2-space indentation plus a trailing newline
//! - body text: indentation taken from the codec settings, no trailing newline

mod json;

pub use json::*;
