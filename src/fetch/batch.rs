//! Batch Fetcher Module
//!
//! Fans a batch request out into independent single-image fetches.

use std::sync::Arc;

use futures::stream::{FuturesUnordered, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{FetchError, Result};
use crate::fetch::{fetch_one, HttpTransport, ImageTransport, RetryPolicy};
use crate::models::{ImageRecord, MAX_COUNT, MIN_COUNT};

/// Message prefix for a batch in which nothing succeeded
const ALL_FAILED: &str = "Failed to fetch any cat images";

// == Batch Outcome ==
/// One failed sub-fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    /// Position of the sub-fetch in launch order
    pub index: usize,
    pub reason: FetchError,
}

/// Settled results of a batch.
///
/// `succeeded` is in settle order, not launch order.
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub succeeded: Vec<ImageRecord>,
    pub failed: Vec<BatchFailure>,
}

impl BatchOutcome {
    /// Converts the outcome into the images a caller can use.
    ///
    /// A partial failure is not an error: the failures are logged and the
    /// successes returned. An empty batch becomes `Cancelled` when any
    /// sub-fetch was cancelled, otherwise `UpstreamExhausted` with every
    /// reason joined into one message.
    pub fn into_images(self) -> Result<Vec<ImageRecord>> {
        if self.succeeded.is_empty() {
            if self.failed.iter().any(|f| f.reason.is_cancelled()) {
                return Err(FetchError::Cancelled);
            }
            return Err(FetchError::UpstreamExhausted(self.failure_summary()));
        }

        if !self.failed.is_empty() {
            warn!(
                "Partial batch: {} of {} image fetches failed ({})",
                self.failed.len(),
                self.failed.len() + self.succeeded.len(),
                self.reasons()
            );
        }

        Ok(self.succeeded)
    }

    fn failure_summary(&self) -> String {
        if self.failed.is_empty() {
            ALL_FAILED.to_string()
        } else {
            format!("{}: {}", ALL_FAILED, self.reasons())
        }
    }

    fn reasons(&self) -> String {
        self.failed
            .iter()
            .map(|f| format!("#{}: {}", f.index, f.reason))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

// == Batch Fetcher ==
/// Issues `count` concurrent single-image fetches sharing one cancellation
/// token. One failure never short-circuits its siblings.
#[derive(Clone)]
pub struct BatchFetcher {
    transport: Arc<dyn ImageTransport>,
    base_url: String,
    policy: RetryPolicy,
}

impl BatchFetcher {
    pub fn new(
        transport: Arc<dyn ImageTransport>,
        base_url: impl Into<String>,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
            policy,
        }
    }

    /// Fetcher for the relay endpoint: status-only transport, server policy.
    pub fn relay(config: &Config) -> Self {
        Self::new(
            Arc::new(HttpTransport::relay()),
            config.upstream_base_url.clone(),
            config.server_policy(),
        )
    }

    /// Fetcher for the direct client path: downloading transport, client policy.
    pub fn direct(config: &Config) -> Self {
        Self::new(
            Arc::new(HttpTransport::direct()),
            config.upstream_base_url.clone(),
            config.client_policy(),
        )
    }

    /// Runs the batch and waits for every sub-fetch to settle.
    ///
    /// `count` is clamped to `[1, 5]`.
    pub async fn fetch_batch(&self, count: usize, cancel: &CancellationToken) -> BatchOutcome {
        let count = count.clamp(MIN_COUNT, MAX_COUNT);
        let transport = self.transport.as_ref();
        let base_url = self.base_url.as_str();
        let policy = &self.policy;

        let mut pending: FuturesUnordered<_> = (0..count)
            .map(|index| async move {
                (index, fetch_one(transport, base_url, policy, cancel).await)
            })
            .collect();

        let mut outcome = BatchOutcome::default();
        while let Some((index, result)) = pending.next().await {
            match result {
                Ok(image) => outcome.succeeded.push(image),
                Err(reason) => outcome.failed.push(BatchFailure { index, reason }),
            }
        }

        debug!(
            "Batch of {} settled: {} succeeded, {} failed",
            count,
            outcome.succeeded.len(),
            outcome.failed.len()
        );
        outcome
    }

    /// Runs the batch and applies `BatchOutcome::into_images`.
    pub async fn fetch_images(
        &self,
        count: usize,
        cancel: &CancellationToken,
    ) -> Result<Vec<ImageRecord>> {
        self.fetch_batch(count, cancel).await.into_images()
    }
}
