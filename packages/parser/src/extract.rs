//! PDF → plain-text transcript extraction.

use crate::ExtractError;

/// Extracts the text of a result-sheet PDF held in memory.
///
/// Result sheets are single-page documents, so the whole text is returned
/// as one transcript.
///
/// # Errors
///
/// Returns [`ExtractError::Pdf`] if the bytes are not a readable PDF, or
/// [`ExtractError::Empty`] if the PDF contains no text.
pub fn extract_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ExtractError::Pdf(format!("failed to extract text from PDF: {e}")))?;

    log::debug!(
        "Extracted {} characters of text from {} byte PDF",
        text.len(),
        bytes.len()
    );

    if text.trim().is_empty() {
        return Err(ExtractError::Empty);
    }

    Ok(text)
}
