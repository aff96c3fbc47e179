//! Text form of name/value pairs: `name=value, name=value`.
//!
//! A backslash before `,` or `=` makes it literal. Serialization escapes only
//! the first comma and the first equals sign of each name and value, so
//! fields containing several of either do not survive a text round trip.

use bodycodec_domain::FormField;

const ESCAPE: char = '\\';

/// Serializes complete fields as `name=value` pairs joined by `, `.
#[must_use]
pub fn fields_to_text(fields: &[FormField]) -> String {
    fields
        .iter()
        .filter(|field| field.is_complete())
        .map(|field| format!("{}={}", escape_first(&field.name), escape_first(&field.value)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn escape_first(s: &str) -> String {
    s.replacen(',', "\\,", 1).replacen('=', "\\=", 1)
}

/// Parses `name=value` pairs separated by unescaped commas.
///
/// Each segment is split on its first unescaped `=`; both sides are trimmed
/// and must be non-empty. Returns `None` unless every segment is a pair.
#[must_use]
pub fn parse_pairs(text: &str) -> Option<Vec<FormField>> {
    split_unescaped(text, ',')
        .into_iter()
        .map(parse_pair)
        .collect()
}

fn parse_pair(segment: &str) -> Option<FormField> {
    let at = find_unescaped(segment, '=')?;
    let name = unescape(segment[..at].trim());
    let value = unescape(segment[at + 1..].trim());

    (!name.is_empty() && !value.is_empty()).then(|| FormField::new(name, value))
}

fn is_escaped(text: &str, at: usize) -> bool {
    text[..at].ends_with(ESCAPE)
}

fn find_unescaped(text: &str, delimiter: char) -> Option<usize> {
    text.match_indices(delimiter)
        .map(|(at, _)| at)
        .find(|&at| !is_escaped(text, at))
}

fn split_unescaped(text: &str, delimiter: char) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    for (at, _) in text.match_indices(delimiter) {
        if !is_escaped(text, at) {
            segments.push(&text[start..at]);
            start = at + delimiter.len_utf8();
        }
    }
    segments.push(&text[start..]);
    segments
}

fn unescape(s: &str) -> String {
    s.replace("\\,", ",").replace("\\=", "=")
}
