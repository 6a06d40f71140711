//! Response DTOs for the relay API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::{Deserialize, Serialize};

use crate::models::ImageRecord;

/// Response body for `GET /api/cat-images`
///
/// Also decoded by the relay client on the orchestrator side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatImagesResponse {
    /// Always true on the success path
    pub success: bool,
    /// Images fetched, in settle order
    pub data: Vec<ImageRecord>,
    /// Number of images in `data`
    pub count: usize,
}

impl CatImagesResponse {
    /// Creates a successful response for `data`
    pub fn new(data: Vec<ImageRecord>) -> Self {
        Self {
            success: true,
            count: data.len(),
            data,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
