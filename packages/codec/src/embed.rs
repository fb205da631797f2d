//! Gzip + base64 wrapping for payloads inlined into static builds.
//!
//! Static builds ship the dataset as a string constant in a script. The
//! JSON payload is gzip-compressed and base64-encoded (standard alphabet
//! with padding); the viewer decompresses it before decoding.

use std::io::{Read as _, Write as _};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use sbte_results_models::{CodeTables, ParsedResult};

use crate::CodecError;
use crate::payload::{PayloadFormat, render_payload_string};

/// Gzip-compresses `bytes` and base64-encodes the result.
///
/// # Errors
///
/// Returns [`CodecError::Io`] if compression fails.
pub fn embed(bytes: &[u8]) -> Result<String, CodecError> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(bytes)?;
    let compressed = encoder.finish()?;

    log::debug!(
        "Compressed {} bytes to {} bytes before base64",
        bytes.len(),
        compressed.len()
    );

    Ok(STANDARD.encode(compressed))
}

/// Reverses [`embed`].
///
/// # Errors
///
/// Returns [`CodecError::Base64`] for invalid base64 and
/// [`CodecError::Io`] for data that is not gzip.
pub fn unembed(encoded: &str) -> Result<Vec<u8>, CodecError> {
    let compressed = STANDARD.decode(encoded.trim())?;
    let mut decoder = GzDecoder::new(&compressed[..]);
    let mut bytes = Vec::new();
    decoder.read_to_end(&mut bytes)?;
    Ok(bytes)
}

/// Renders `results` in the compact format and embeds it.
///
/// # Errors
///
/// Returns [`CodecError`] if serialization or compression fails.
pub fn embed_dataset(results: &[ParsedResult]) -> Result<String, CodecError> {
    let json = render_payload_string(results, PayloadFormat::Compact)?;
    embed(json.as_bytes())
}

/// Decodes a string produced by [`embed_dataset`].
///
/// # Errors
///
/// Returns [`CodecError`] if the string is not base64-wrapped gzip of a
/// compact dataset.
pub fn unembed_dataset(
    encoded: &str,
    tables: &CodeTables,
) -> Result<Vec<ParsedResult>, CodecError> {
    let bytes = unembed(encoded)?;
    let json = String::from_utf8(bytes)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    crate::from_json(&json, tables)
}

/// Formats an embedded payload as an exported script constant.
///
/// ```
/// use sbte_results_codec::embed::script_constant;
///
/// assert_eq!(script_constant("DATA", "H4sI"), "export const DATA = \"H4sI\";\n");
/// ```
#[must_use]
pub fn script_constant(name: &str, encoded: &str) -> String {
    format!("export const {name} = \"{encoded}\";\n")
}
