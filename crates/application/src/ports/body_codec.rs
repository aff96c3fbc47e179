//! Body codec port.

use bodycodec_domain::{BodyType, BodyValue};

/// Converts a body value between representations.
///
/// Implementations are pure: they never mutate the source, hold no state
/// between calls and either return a complete body or fail.
pub trait BodyCodec {
    /// Error raised when a conversion fails.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Converts `source` to the `target` representation.
    ///
    /// Converting to the source's own type returns it unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be interpreted as the target
    /// requires.
    fn convert(&self, source: &BodyValue, target: BodyType) -> Result<BodyValue, Self::Error>;
}

impl<C: BodyCodec + ?Sized> BodyCodec for &C {
    type Error = C::Error;

    fn convert(&self, source: &BodyValue, target: BodyType) -> Result<BodyValue, Self::Error> {
        (**self).convert(source, target)
    }
}
