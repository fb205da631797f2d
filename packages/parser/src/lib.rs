#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Result-sheet extraction and parsing for SBTE semester results.
//!
//! The board publishes each student's result as a single-page PDF. This
//! crate turns that PDF into text ([`extract`], using [`pdf_extract`]) and
//! the text into a [`ParsedResult`] ([`transcript`]). Parsing never fails
//! on malformed content: unknown lines are skipped, bad subject rows are
//! dropped, and unreadable marks become zero. Only a sheet with no roll
//! number or no grand total is rejected.

pub mod extract;
pub mod subject_row;
pub mod transcript;

use sbte_results_models::{CodeTables, ParsedResult};

pub use extract::extract_text;
pub use transcript::{Rejection, parse_transcript};

/// Errors from turning PDF bytes into text.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The bytes could not be read as a PDF.
    #[error("PDF extraction error: {0}")]
    Pdf(String),

    /// The PDF was readable but held no text.
    #[error("PDF contains no text")]
    Empty,
}

/// Why a PDF produced no result.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Text extraction failed.
    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// The transcript was rejected.
    #[error("result rejected: {0}")]
    Rejected(#[from] Rejection),
}

/// Extracts and parses a result-sheet PDF in one step.
///
/// # Errors
///
/// Returns [`ParseError::Extract`] if the PDF is unreadable and
/// [`ParseError::Rejected`] if the transcript holds no usable result.
pub fn parse_pdf(bytes: &[u8], tables: &CodeTables) -> Result<ParsedResult, ParseError> {
    let text = extract_text(bytes)?;
    Ok(parse_transcript(&text, tables)?)
}
