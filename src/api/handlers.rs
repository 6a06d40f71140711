//! API Handlers
//!
//! HTTP request handlers for each relay server endpoint.

use axum::{
    extract::{Query, State},
    Json,
};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::ApiError;
use crate::fetch::BatchFetcher;
use crate::models::{CatImagesQuery, CatImagesResponse, HealthResponse};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Batch fetcher bound to the upstream image host
    pub fetcher: BatchFetcher,
}

impl AppState {
    /// Creates a new AppState with the given fetcher.
    pub fn new(fetcher: BatchFetcher) -> Self {
        Self { fetcher }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Uses the status-only transport and the server retry policy.
    pub fn from_config(config: &Config) -> Self {
        Self::new(BatchFetcher::relay(config))
    }
}

/// Handler for GET /api/cat-images
///
/// Fetches `count` images (default 3, clamped to 1..=5) from the upstream
/// host. The batch runs on its own task so a client disconnect does not
/// abort it. Responds 503 when no image could be fetched and 500 when the
/// batch task itself failed.
pub async fn cat_images_handler(
    State(state): State<AppState>,
    Query(query): Query<CatImagesQuery>,
) -> Result<Json<CatImagesResponse>, ApiError> {
    let count = query.count();
    let fetcher = state.fetcher.clone();

    let outcome = tokio::spawn(async move {
        fetcher.fetch_batch(count, &CancellationToken::new()).await
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))?;

    match outcome.into_images() {
        Ok(images) => {
            info!("Relayed {} of {} requested cat images", images.len(), count);
            Ok(Json(CatImagesResponse::new(images)))
        }
        Err(err) => {
            warn!("No cat images obtained from upstream: {}", err);
            Err(ApiError::UpstreamUnavailable)
        }
    }
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
