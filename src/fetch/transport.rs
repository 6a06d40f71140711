//! Image Transport Module
//!
//! Performs the single HTTP request behind one fetch attempt.

use async_trait::async_trait;
use reqwest::{header::ACCEPT, Client};

use crate::error::{FetchError, Result};

/// Performs one request against the upstream image resource.
///
/// Implementations report non-2xx statuses and network failures as
/// `FetchError::Transport`. Timeouts and cancellation are applied by the
/// caller.
#[async_trait]
pub trait ImageTransport: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<()>;
}

// == HTTP Transport ==
/// reqwest-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    /// Download the payload rather than only checking the status
    read_body: bool,
}

impl HttpTransport {
    /// Transport used by the relay endpoint: status check only.
    pub fn relay() -> Self {
        Self::with_client(Client::new(), false)
    }

    /// Transport used by the direct client path: downloads the image.
    pub fn direct() -> Self {
        Self::with_client(Client::new(), true)
    }

    pub fn with_client(client: Client, read_body: bool) -> Self {
        Self { client, read_body }
    }
}

#[async_trait]
impl ImageTransport for HttpTransport {
    async fn fetch(&self, url: &str) -> Result<()> {
        let response = self.client.get(url).header(ACCEPT, "image/*").send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Transport(format!(
                "HTTP error! status: {}",
                status.as_u16()
            )));
        }

        if self.read_body {
            let body = response.bytes().await?;
            if body.is_empty() {
                return Err(FetchError::Transport("No image data received".to_string()));
            }
        }

        Ok(())
    }
}
