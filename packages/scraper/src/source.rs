//! Where transcripts come from.
//!
//! [`TranscriptSource`] is the seam between the orchestrator and the
//! network. [`PortalSource`] downloads the result PDF from the board's
//! portal and extracts its text.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ORIGIN, REFERER};
use sbte_results_parser::extract_text;

use crate::{ScrapeError, config::ScrapeConfig, retry};

/// Fetches the result-sheet text for a roll number.
pub trait TranscriptSource: Send + Sync {
    /// Returns the transcript text for `roll`, or `None` when the source
    /// has no result for it.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError`] if the fetch or text extraction fails.
    fn fetch_transcript(
        &self,
        roll: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>, ScrapeError>> + Send;

    /// Short name for log lines.
    fn name(&self) -> &str;
}

/// Downloads result PDFs from the board's result portal.
#[derive(Debug, Clone)]
pub struct PortalSource {
    client: reqwest::Client,
    api_url: String,
}

impl PortalSource {
    /// Builds a client carrying the portal's expected browser headers.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::InvalidConfig`] if a configured header value
    /// is not a valid HTTP header, or [`ScrapeError::Http`] if the client
    /// cannot be built.
    pub fn new(config: &ScrapeConfig) -> Result<Self, ScrapeError> {
        let mut headers = HeaderMap::new();
        headers.insert(REFERER, header_value("referer", &config.referer)?);
        headers.insert(ORIGIN, header_value("origin", &config.origin)?);

        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
        })
    }
}

impl TranscriptSource for PortalSource {
    fn fetch_transcript(
        &self,
        roll: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>, ScrapeError>> + Send {
        async move {
            let Some(pdf) = retry::send_bytes(|| {
                self.client
                    .get(&self.api_url)
                    .query(&[("rollNumber", roll)])
            })
            .await?
            else {
                return Ok(None);
            };

            log::debug!("Fetched result for roll number: {roll} ({} bytes)", pdf.len());

            // pdf-extract is CPU-bound and may panic on malformed input; a
            // panic surfaces here as a JoinError.
            let text = tokio::task::spawn_blocking(move || extract_text(&pdf)).await??;

            Ok(Some(text))
        }
    }

    fn name(&self) -> &'static str {
        "portal"
    }
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue, ScrapeError> {
    HeaderValue::from_str(value)
        .map_err(|e| ScrapeError::InvalidConfig(format!("invalid {name} header: {e}")))
}
