//! HTTP retry helpers for transient errors.
//!
//! Portal fetches go through [`send_bytes`] instead of calling
//! `reqwest::RequestBuilder::send()` directly, so every request gets
//! automatic retry with exponential backoff for timeouts, connection
//! resets, server errors and rate limiting.
//!
//! ```ignore
//! let pdf = retry::send_bytes(|| client.get(&url).query(&[("rollNumber", roll)])).await?;
//! ```

use std::time::Duration;

use crate::ScrapeError;

/// Maximum number of retry attempts for transient HTTP errors.
///
/// With exponential backoff (2s, 4s, 8s) the total wait before giving up
/// is 14 seconds.
const MAX_RETRIES: u32 = 3;

/// Sends an HTTP request and returns the response body.
///
/// The `build_request` closure is called on each attempt to construct a
/// fresh [`reqwest::RequestBuilder`], since builders are consumed by
/// `.send()`.
///
/// Returns `Ok(None)` when the server answers with a 4xx status other
/// than 429. The portal answers this way for roll numbers it has no
/// result for, so the caller treats it as "no document" rather than an
/// error.
///
/// # Errors
///
/// Returns [`ScrapeError`] if the request still fails after all retries
/// or the body cannot be read.
#[allow(clippy::future_not_send)]
pub async fn send_bytes<F>(build_request: F) -> Result<Option<Vec<u8>>, ScrapeError>
where
    F: Fn() -> reqwest::RequestBuilder,
{
    let Some(response) = send_inner(&build_request, MAX_RETRIES).await? else {
        return Ok(None);
    };

    let url = response.url().to_string();
    let bytes = response.bytes().await?;
    log::debug!("Received {} bytes from {url}", bytes.len());

    Ok(Some(bytes.to_vec()))
}

/// Core retry loop.
///
/// Sends the request built by `build_request`, retrying on transient
/// errors up to `max_retries` times with exponential backoff. Returns the
/// successful [`reqwest::Response`], or `None` for a permanent 4xx.
#[allow(clippy::future_not_send)]
async fn send_inner<F>(
    build_request: &F,
    max_retries: u32,
) -> Result<Option<reqwest::Response>, ScrapeError>
where
    F: Fn() -> reqwest::RequestBuilder,
{
    let mut last_error: Option<ScrapeError> = None;

    for attempt in 0..=max_retries {
        if attempt > 0 {
            let delay = Duration::from_secs(1u64 << attempt);
            log::warn!("  retry {attempt}/{max_retries} in {delay:?}...");
            tokio::time::sleep(delay).await;
        }

        match build_request().send().await {
            Err(e) => {
                if is_transient(&e) && attempt < max_retries {
                    log::warn!("  transient error: {e}");
                    last_error = Some(ScrapeError::Http(e));
                    continue;
                }
                return Err(ScrapeError::Http(e));
            }
            Ok(response) => {
                let status = response.status();

                if status == reqwest::StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
                    if attempt < max_retries {
                        log::warn!("  HTTP {status}");
                        last_error = Some(ScrapeError::Status(status.as_u16()));
                        continue;
                    }
                    return Err(ScrapeError::Status(status.as_u16()));
                }

                if status.is_client_error() {
                    log::debug!("  HTTP {status} for {}", response.url());
                    return Ok(None);
                }

                return Ok(Some(response));
            }
        }
    }

    Err(last_error.unwrap_or(ScrapeError::RetriesExhausted))
}

/// Returns `true` if the error is likely transient and worth retrying.
fn is_transient(e: &reqwest::Error) -> bool {
    e.is_timeout() || e.is_connect() || e.is_body() || e.is_request()
}
