//! Base64 validation and text encoding.

use std::sync::LazyLock;

use ::base64::Engine;
use ::base64::alphabet;
use ::base64::engine::DecodePaddingMode;
use ::base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use regex::Regex;

#[allow(clippy::expect_used)]
static BASE64_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9+/]+={0,2}$").expect("valid regex"));

/// Accepts missing padding and non-zero trailing bits so that the canonical
/// comparison in [`is_valid_base64`] decides instead of the decoder.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Returns true if `source` is canonically encoded standard Base64.
///
/// The text must use the standard alphabet with at most two trailing `=`,
/// and must survive a decode/re-encode round trip. The two encodings are
/// compared up to whichever padding starts first, so missing padding is
/// tolerated while non-canonical trailing bits are not.
#[must_use]
pub fn is_valid_base64(source: &str) -> bool {
    if !BASE64_SHAPE.is_match(source) {
        return false;
    }

    let Ok(bytes) = LENIENT.decode(source) else {
        return false;
    };
    let reencoded = STANDARD.encode(bytes);

    let boundary = padding_start(source).min(padding_start(&reencoded));
    source.get(..boundary) == reencoded.get(..boundary)
}

fn padding_start(s: &str) -> usize {
    s.find('=').unwrap_or(s.len())
}

/// Decodes Base64 text to bytes, or `None` if it is not valid Base64.
#[must_use]
pub fn decode(source: &str) -> Option<Vec<u8>> {
    if !is_valid_base64(source) {
        return None;
    }
    LENIENT.decode(source).ok()
}

/// Encodes bytes as padded standard Base64.
#[must_use]
pub fn encode(bytes: impl AsRef<[u8]>) -> String {
    STANDARD.encode(bytes)
}
