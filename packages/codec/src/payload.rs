//! Wire payload formats for the `students-data` endpoint and static exports.

use sbte_results_models::ParsedResult;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::{CodecError, dedup_by_roll, encode_dataset};

/// Shape of a dataset payload.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PayloadFormat {
    /// Array of keyed [`ParsedResult`] objects.
    #[default]
    Full,
    /// Array of positional [`EncodedResult`](crate::EncodedResult) tuples.
    Compact,
}

/// Renders `results` as a JSON array in the requested format.
///
/// Both formats drop later duplicates of a roll number.
///
/// # Errors
///
/// Returns [`CodecError::Json`] if serialization fails.
pub fn render_payload(
    results: &[ParsedResult],
    format: PayloadFormat,
) -> Result<serde_json::Value, CodecError> {
    let value = match format {
        PayloadFormat::Full => serde_json::to_value(dedup_by_roll(results))?,
        PayloadFormat::Compact => serde_json::to_value(encode_dataset(results))?,
    };
    Ok(value)
}

/// Renders `results` as a JSON string in the requested format.
///
/// # Errors
///
/// Returns [`CodecError::Json`] if serialization fails.
pub fn render_payload_string(
    results: &[ParsedResult],
    format: PayloadFormat,
) -> Result<String, CodecError> {
    Ok(serde_json::to_string(&render_payload(results, format)?)?)
}
