//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation of body values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The value is not a list of name/value pairs.
    #[error("expected a list of name/value pairs")]
    NotPairList,

    /// An entry of a name/value list is missing a usable name or value.
    #[error("invalid name/value pair at index {index}: {reason}")]
    InvalidPair {
        /// Position of the offending entry.
        index: usize,
        /// What is wrong with it.
        reason: String,
    },

    /// A body type tag is not one of the six known representations.
    #[error("unknown body type: {0}")]
    UnknownBodyType(String),
}

impl DomainError {
    /// Creates an `InvalidPair` error.
    pub fn invalid_pair(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidPair {
            index,
            reason: reason.into(),
        }
    }
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
