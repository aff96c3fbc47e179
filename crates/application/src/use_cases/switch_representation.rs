//! Switch body representation use case.

use bodycodec_domain::{BodyType, BodyValue};

use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::BodyCodec;

/// Use case for changing the representation of a body being edited.
///
/// The edited body is replaced only when the conversion succeeds; on failure
/// it keeps its previous representation and content.
pub struct SwitchBodyRepresentation<C: BodyCodec> {
    codec: C,
}

impl<C: BodyCodec> SwitchBodyRepresentation<C> {
    /// Creates a new `SwitchBodyRepresentation` use case.
    #[must_use]
    pub const fn new(codec: C) -> Self {
        Self { codec }
    }

    /// Converts `body` in place to `target`.
    ///
    /// Returns the previous representation tag.
    ///
    /// # Errors
    /// - Returns `Conversion` if the codec rejects the body; `body` is left untouched
    pub fn execute(&self, body: &mut BodyValue, target: BodyType) -> ApplicationResult<BodyType> {
        let previous = body.body_type();
        if previous == target {
            return Ok(previous);
        }

        match self.codec.convert(body, target) {
            Ok(converted) => {
                tracing::debug!(from = %previous, to = %target, "switched body representation");
                *body = converted;
                Ok(previous)
            }
            Err(e) => {
                tracing::warn!(from = %previous, to = %target, error = %e, "keeping previous body representation");
                Err(ApplicationError::Conversion(e.to_string()))
            }
        }
    }
}
