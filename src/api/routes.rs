//! API Routes
//!
//! Configures the Axum router with all relay server endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{cat_images_handler, health_handler, AppState};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /api/cat-images` - Fetch a batch of cat images
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin so browser clients can call the relay
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/cat-images", get(cat_images_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::testing::{MockTransport, Reply};
    use crate::fetch::{BatchFetcher, RetryPolicy};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::sync::Arc;
    use tower::util::ServiceExt;

    fn create_test_app(reply: Reply) -> Router {
        let fetcher = BatchFetcher::new(
            Arc::new(MockTransport::always(reply)),
            "https://cataas.com",
            RetryPolicy::server().with_max_retries(0),
        );
        create_router(AppState::new(fetcher))
    }

    async fn status_of(app: Router, uri: &str) -> StatusCode {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let status = status_of(create_test_app(Reply::Ok), "/health").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_cat_images_endpoint() {
        let status = status_of(create_test_app(Reply::Ok), "/api/cat-images?count=2").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_cat_images_non_numeric_count() {
        let status = status_of(create_test_app(Reply::Ok), "/api/cat-images?count=abc").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_cat_images_count_with_trailing_text() {
        let response = create_test_app(Reply::Ok)
            .oneshot(
                Request::builder()
                    .uri("/api/cat-images?count=4abc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["count"], 4);
    }

    #[tokio::test]
    async fn test_cat_images_service_unavailable() {
        let status = status_of(create_test_app(Reply::Status(502)), "/api/cat-images").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_cat_images_panicked_batch_is_internal_error() {
        let response = create_test_app(Reply::Panic)
            .oneshot(
                Request::builder()
                    .uri("/api/cat-images?count=2")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(
            body["error"],
            "Internal server error while fetching cat images"
        );
        assert!(!body["error"].as_str().unwrap().contains("crashed"));
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let status = status_of(create_test_app(Reply::Ok), "/api/dog-images").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
