//! Convert body use case.

use bodycodec_domain::{BodyType, BodyValue};

use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::BodyCodec;

/// Input for converting a body.
#[derive(Debug, Clone)]
pub struct ConvertBodyInput {
    /// The body to convert.
    pub body: BodyValue,
    /// The representation to convert to.
    pub target: BodyType,
}

/// Output from converting a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertBodyOutput {
    /// The converted body.
    pub body: BodyValue,
    /// Whether the representation differs from the input's.
    pub changed: bool,
}

/// Use case for converting a body to another representation.
pub struct ConvertBody<C: BodyCodec> {
    codec: C,
}

impl<C: BodyCodec> ConvertBody<C> {
    /// Creates a new `ConvertBody` use case.
    #[must_use]
    pub const fn new(codec: C) -> Self {
        Self { codec }
    }

    /// Converts the input body.
    ///
    /// # Errors
    /// - Returns `Conversion` if the codec rejects the source for the target
    pub fn execute(&self, input: ConvertBodyInput) -> ApplicationResult<ConvertBodyOutput> {
        let source_type = input.body.body_type();
        let body = self
            .codec
            .convert(&input.body, input.target)
            .map_err(|e| {
                tracing::warn!(source = %source_type, target = %input.target, error = %e, "body conversion failed");
                ApplicationError::Conversion(e.to_string())
            })?;

        tracing::debug!(source = %source_type, target = %input.target, "body converted");
        Ok(ConvertBodyOutput {
            changed: source_type != input.target,
            body,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, thiserror::Error)]
    #[error("cannot convert {0}")]
    struct FakeError(BodyType);

    /// Upper-cases text and refuses forms.
    struct FakeCodec;

    impl BodyCodec for FakeCodec {
        type Error = FakeError;

        fn convert(&self, source: &BodyValue, target: BodyType) -> Result<BodyValue, FakeError> {
            match (source, target) {
                (BodyValue::Form(_), _) => Err(FakeError(source.body_type())),
                (_, t) if t == source.body_type() => Ok(source.clone()),
                (BodyValue::Text(s), BodyType::Json) => Ok(BodyValue::json(s.to_uppercase())),
                _ => Ok(BodyValue::empty(target)),
            }
        }
    }

    #[test]
    fn test_convert_reports_change() {
        let use_case = ConvertBody::new(FakeCodec);
        let output = use_case
            .execute(ConvertBodyInput {
                body: BodyValue::text("abc"),
                target: BodyType::Json,
            })
            .unwrap();

        assert_eq!(output.body, BodyValue::json("ABC"));
        assert!(output.changed);
    }

    #[test]
    fn test_convert_same_type_is_unchanged() {
        let use_case = ConvertBody::new(FakeCodec);
        let output = use_case
            .execute(ConvertBodyInput {
                body: BodyValue::text("abc"),
                target: BodyType::Text,
            })
            .unwrap();

        assert_eq!(output.body, BodyValue::text("abc"));
        assert!(!output.changed);
    }

    #[test]
    fn test_convert_maps_codec_errors() {
        let use_case = ConvertBody::new(FakeCodec);
        let err = use_case
            .execute(ConvertBodyInput {
                body: BodyValue::form(Vec::new()),
                target: BodyType::Text,
            })
            .unwrap_err();

        let ApplicationError::Conversion(message) = err;
        assert_eq!(message, "cannot convert Form");
    }
}
