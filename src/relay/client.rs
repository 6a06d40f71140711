//! Relay Client
//!
//! Calls `GET /api/cat-images?count=N` on the relay server.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::error::{FetchError, Result};
use crate::models::{CatImagesResponse, ImageRecord};

/// Source of image batches for the orchestrator's primary path.
///
/// Implementations return `FetchError::Cancelled` once `cancel` fires and
/// any other error when the relay cannot serve the batch.
#[async_trait]
pub trait ImageRelay: Send + Sync {
    async fn fetch_images(
        &self,
        count: usize,
        cancel: &CancellationToken,
    ) -> Result<Vec<ImageRecord>>;
}

// == HTTP Relay ==
/// reqwest client for a running relay server.
#[derive(Debug, Clone)]
pub struct HttpRelay {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpRelay {
    /// Relay served under `base_url`, e.g. `http://127.0.0.1:3000`.
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            endpoint: format!("{}/api/cat-images", base_url.trim_end_matches('/')),
            timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.relay_base_url, config.relay_timeout())
    }

    async fn request(&self, count: usize) -> Result<Vec<ImageRecord>> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("count", count)])
            .send()
            .await
            .map_err(|e| FetchError::RelayUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::RelayUnavailable(format!(
                "relay responded with status {}",
                status.as_u16()
            )));
        }

        let body: CatImagesResponse = response
            .json()
            .await
            .map_err(|e| FetchError::RelayUnavailable(format!("invalid relay body: {}", e)))?;

        if !body.success || body.data.is_empty() {
            return Err(FetchError::RelayUnavailable(
                "relay returned no images".to_string(),
            ));
        }

        Ok(body.data)
    }
}

#[async_trait]
impl ImageRelay for HttpRelay {
    async fn fetch_images(
        &self,
        count: usize,
        cancel: &CancellationToken,
    ) -> Result<Vec<ImageRecord>> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(FetchError::Cancelled),
            result = timeout(self.timeout, self.request(count)) => match result {
                Ok(inner) => inner,
                Err(_) => Err(FetchError::RelayUnavailable(format!(
                    "relay timed out after {} ms",
                    self.timeout.as_millis()
                ))),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_from_base_url() {
        let relay = HttpRelay::new("http://localhost:3000/", Duration::from_secs(1));
        assert_eq!(relay.endpoint, "http://localhost:3000/api/cat-images");
    }

    #[tokio::test]
    async fn test_cancelled_before_request() {
        // Port 9 (discard) is never contacted: cancellation wins the race
        let relay = HttpRelay::new("http://127.0.0.1:9", Duration::from_secs(1));
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = relay.fetch_images(3, &cancel).await.unwrap_err();
        assert!(err.is_cancelled());
    }
}
