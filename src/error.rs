//! Error types for image fetching and the relay endpoint
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Fetch Error Enum ==
/// Failure kinds produced while fetching images.
///
/// `Timeout` and `Transport` are retried inside a single image fetch and do
/// not escape it; callers of the batch and relay layers see the remaining
/// variants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// An attempt exceeded its deadline
    #[error("Request timed out after {0} ms")]
    Timeout(u64),

    /// Network failure or non-2xx status
    #[error("{0}")]
    Transport(String),

    /// The request was superseded or explicitly aborted
    #[error("Request cancelled")]
    Cancelled,

    /// Every attempt failed; carries the aggregated reason
    #[error("{0}")]
    UpstreamExhausted(String),

    /// The relay endpoint could not serve the batch
    #[error("Relay unavailable: {0}")]
    RelayUnavailable(String),
}

impl FetchError {
    /// True for superseded or aborted requests.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, FetchError::Cancelled)
    }

    /// True for failures a single image fetch retries locally.
    pub fn is_retryable(&self) -> bool {
        matches!(self, FetchError::Timeout(_) | FetchError::Transport(_))
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport(err.to_string())
    }
}

// == API Error Enum ==
/// Errors returned by the relay HTTP endpoint.
#[derive(Error, Debug)]
pub enum ApiError {
    /// No image could be obtained from the upstream host
    #[error("Failed to fetch cat images from external API")]
    UpstreamUnavailable,

    /// Unexpected fault; the detail is logged, never returned
    #[error("Internal server error while fetching cat images")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::UpstreamUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(detail) => {
                tracing::error!("Server error fetching cat images: {}", detail);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "success": false,
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for fetch operations.
pub type Result<T> = std::result::Result<T, FetchError>;
