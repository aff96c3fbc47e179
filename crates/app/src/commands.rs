//! Subcommand implementations.
//!
//! Each command takes the raw input text and returns what should be printed,
//! so the I/O stays in `main`.

use std::path::Path;

use bodycodec_application::{ApplicationError, ConvertBody, ConvertBodyInput};
use bodycodec_domain::{BodyType, BodyValue, CodecSettings, DomainError, parse_pair_data};
use bodycodec_infrastructure::{
    CodecError, SerializationError, SettingsError, Transcoder, decode_payload, encode_payload,
    from_json, parse_text, to_json_pretty, validate_json,
};
use tokio::io::AsyncReadExt;

/// Errors surfaced by the command-line front end.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Reading the input failed.
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    /// The input is not the JSON the command expects.
    #[error("invalid input: {0}")]
    Serialization(#[from] SerializationError),

    /// The input does not hold a valid body.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The settings file could not be loaded.
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// The conversion was rejected.
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// The body could not be encoded for the wire.
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Reads all input from `path`, or from stdin when no path is given.
pub async fn read_input(path: Option<&Path>) -> Result<String, CliError> {
    match path {
        Some(path) => Ok(tokio::fs::read_to_string(path).await?),
        None => {
            let mut input = String::new();
            tokio::io::stdin().read_to_string(&mut input).await?;
            Ok(input)
        }
    }
}

/// Like [`read_input`], without requiring UTF-8.
pub async fn read_input_bytes(path: Option<&Path>) -> Result<Vec<u8>, CliError> {
    match path {
        Some(path) => Ok(tokio::fs::read(path).await?),
        None => {
            let mut input = Vec::new();
            tokio::io::stdin().read_to_end(&mut input).await?;
            Ok(input)
        }
    }
}

/// Builds the body described by `input`.
///
/// With `envelope` set the input is a `{"type", "data"}` document; otherwise
/// it is the data of a `from` body, and form data is a JSON array of fields.
/// Trailing line breaks are not part of the data.
pub fn read_body(input: &str, from: BodyType, envelope: bool) -> Result<BodyValue, CliError> {
    if envelope {
        return Ok(from_json(input)?);
    }

    let data = input.trim_end_matches(['\r', '\n']);
    let body = match from {
        BodyType::None => BodyValue::None,
        BodyType::Text => BodyValue::text(data),
        BodyType::Json => BodyValue::json(data),
        BodyType::Xml => BodyValue::xml(data),
        BodyType::Raw => BodyValue::raw(data),
        BodyType::Form if data.trim().is_empty() => BodyValue::empty(BodyType::Form),
        BodyType::Form => BodyValue::Form(parse_pair_data(&validate_json(data)?)?),
    };
    Ok(body)
}

/// Renders a body for printing: its data, or the whole envelope.
pub fn render_body(body: &BodyValue, envelope: bool, indent: usize) -> Result<String, CliError> {
    if envelope {
        return Ok(to_json_pretty(body, indent)?);
    }

    Ok(match body {
        BodyValue::None => String::new(),
        BodyValue::Form(fields) => to_json_pretty(fields, indent)?,
        BodyValue::Text(s) | BodyValue::Json(s) | BodyValue::Xml(s) | BodyValue::Raw(s) => {
            s.clone()
        }
    })
}

/// Converts the input body to `target`.
pub fn convert(
    input: &str,
    from: BodyType,
    target: BodyType,
    envelope: bool,
    settings: CodecSettings,
) -> Result<String, CliError> {
    let body = read_body(input, from, envelope)?;
    let indent = settings.json_indent;
    let use_case = ConvertBody::new(Transcoder::new(settings));

    let output = use_case.execute(ConvertBodyInput { body, target })?;
    tracing::debug!(changed = output.changed, "conversion finished");
    render_body(&output.body, envelope, indent)
}

/// Reports how untyped text would be interpreted.
pub fn classify(input: &str, indent: usize) -> Result<String, CliError> {
    let data = input.trim_end_matches(['\r', '\n']);
    let Some(classified) = parse_text(data, true) else {
        return Ok("empty".to_string());
    };

    let kind = classified.kind();
    let value = to_json_pretty(&classified.into_value(), indent)?;
    Ok(format!("{kind}\n{value}"))
}

/// Reports the wire payload the input body would be sent as.
pub fn encode(input: &str, from: BodyType, envelope: bool) -> Result<String, CliError> {
    let body = read_body(input, from, envelope)?;
    let payload = encode_payload(&body)?;

    let content_type = payload.content_type().unwrap_or("none");
    Ok(format!(
        "content-type: {content_type}\nbytes: {}",
        payload.bytes.len()
    ))
}

/// Builds a body from received bytes, as a response would be read.
pub fn decode(input: &[u8], content_type: Option<&str>, indent: usize) -> Result<String, CliError> {
    let body = decode_payload(input, content_type);
    render_body(&body, true, indent)
}
