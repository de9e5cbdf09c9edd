//! mtc-json: JSON encoding and decoding of MTConnect streams documents.

pub mod codec;
pub mod dispatch;
pub mod document;
pub mod options;
pub mod wire;

use std::path::Path;

use mtc_core::{MtcError, Representation};
use mtc_streams::{Streams, ValidationError};

pub use codec::{SentinelPolicy, UNAVAILABLE, decode_payload, decode_payload_str, encode_payload};
pub use dispatch::{FieldGroup, field_name, group_observations, parse_field_name};
pub use document::{DecodeIssue, DecodeReport, Decoded, decode_document, encode_document};
pub use options::CodecOptions;

pub type JsonResult<T> = Result<T, JsonError>;

#[derive(thiserror::Error, Debug)]
pub enum JsonError {
    #[error("Malformed {representation} payload: {reason}")]
    MalformedPayload {
        representation: Representation,
        reason: String,
    },

    #[error("Invalid document at {path}: {reason}")]
    Structure { path: String, reason: String },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid value: {0}")]
    Core(#[from] MtcError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Render streams as a JSON document string.
pub fn to_string(streams: &Streams, options: &CodecOptions) -> JsonResult<String> {
    if options.validate {
        mtc_streams::validate_streams(streams)?;
    }
    let document = encode_document(streams, options)?;
    let text = if options.pretty {
        serde_json::to_string_pretty(&document)?
    } else {
        serde_json::to_string(&document)?
    };
    Ok(text)
}

/// Parse a JSON document string.
///
/// Structural errors fail the whole parse. Malformed observations are
/// dropped and listed in the returned report.
pub fn from_str(text: &str, options: &CodecOptions) -> JsonResult<Decoded> {
    let document = serde_json::from_str(text)?;
    let decoded = decode_document(document, options);
    if options.validate {
        mtc_streams::validate_streams(&decoded.streams)?;
    }
    Ok(decoded)
}

pub fn save_json(streams: &Streams, path: &Path, options: &CodecOptions) -> JsonResult<()> {
    let text = to_string(streams, options)?;
    std::fs::write(path, text)?;
    Ok(())
}

pub fn load_json(path: &Path, options: &CodecOptions) -> JsonResult<Decoded> {
    let text = std::fs::read_to_string(path)?;
    from_str(&text, options)
}
