//! Single Image Fetch
//!
//! One upstream request with per-attempt timeout, cancellation and
//! exponential backoff between retries.

use tokio::time::{sleep, timeout};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::{FetchError, Result};
use crate::fetch::{ImageTransport, RetryPolicy};
use crate::models::{image_url, unique_token, ImageRecord};

/// Fetches one image from `base_url`.
///
/// Each attempt uses a fresh uniqueness token and races the transport
/// against the policy timeout and `cancel`. Timeouts and transport failures
/// are retried up to `policy.max_retries` times; once retries run out the
/// last failure comes back as `FetchError::UpstreamExhausted`.
///
/// Cancellation ends the fetch immediately with `FetchError::Cancelled`,
/// is never retried and is logged at debug level only.
pub async fn fetch_one(
    transport: &dyn ImageTransport,
    base_url: &str,
    policy: &RetryPolicy,
    cancel: &CancellationToken,
) -> Result<ImageRecord> {
    let mut last_error: Option<FetchError> = None;

    for attempt in 0..=policy.max_retries {
        if cancel.is_cancelled() {
            debug!("Image fetch cancelled before attempt {}", attempt);
            return Err(FetchError::Cancelled);
        }

        let token = unique_token();
        let url = image_url(base_url, &token);

        // Dropping the transport future on timeout or cancel aborts the request.
        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(FetchError::Cancelled),
            result = timeout(policy.timeout, transport.fetch(&url)) => match result {
                Ok(inner) => inner,
                Err(_) => Err(FetchError::Timeout(policy.timeout.as_millis() as u64)),
            },
        };

        let err = match outcome {
            Ok(()) => return Ok(ImageRecord::new(&token, url)),
            Err(FetchError::Cancelled) => {
                debug!("Image fetch cancelled during attempt {}", attempt);
                return Err(FetchError::Cancelled);
            }
            Err(err) if err.is_retryable() => err,
            Err(err) => return Err(FetchError::UpstreamExhausted(err.to_string())),
        };

        if attempt < policy.max_retries {
            let delay = policy.delay_for(attempt);
            warn!(
                "Failed to fetch cat image (attempt {}): {}; retrying in {:?}",
                attempt + 1,
                err,
                delay
            );
            last_error = Some(err);

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!("Image fetch cancelled during backoff");
                    return Err(FetchError::Cancelled);
                }
                _ = sleep(delay) => {}
            }
        } else {
            warn!(
                "Failed to fetch cat image after {} retries: {}",
                policy.max_retries, err
            );
            last_error = Some(err);
        }
    }

    Err(FetchError::UpstreamExhausted(
        last_error.map_or_else(|| "no attempt made".to_string(), |e| e.to_string()),
    ))
}
