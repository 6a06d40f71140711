//! Integration Tests for the orchestrator
//!
//! Exercises the relay path against a real relay server and the fallback
//! path against a failing relay, with wiremock standing in for the image
//! host.

use std::sync::Arc;
use std::time::Duration;

use cat_sticker::{
    cache::{shared, CacheStore, DEFAULT_TTL},
    create_router,
    fetch::{BatchFetcher, HttpTransport, RetryPolicy},
    relay::HttpRelay,
    AppState, Orchestrator,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// == Helper Functions ==

fn fast_policy() -> RetryPolicy {
    RetryPolicy {
        timeout: Duration::from_secs(2),
        max_retries: 1,
        backoff_base: Duration::from_millis(5),
        backoff_cap: Duration::from_millis(20),
    }
}

async fn image_host(status: u16) -> MockServer {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cat"))
        .respond_with(ResponseTemplate::new(status).set_body_bytes(vec![0x89, 0x50, 0x4E, 0x47]))
        .mount(&upstream)
        .await;
    upstream
}

/// Binds a relay server backed by `upstream` and returns its base URL.
async fn spawn_relay(upstream: &MockServer) -> String {
    let fetcher = BatchFetcher::new(
        Arc::new(HttpTransport::relay()),
        upstream.uri(),
        fast_policy(),
    );
    let app = create_router(AppState::new(fetcher));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

fn orchestrator(relay_base: &str, upstream: &MockServer) -> Orchestrator {
    let relay = HttpRelay::new(relay_base, Duration::from_secs(5));
    let fallback = BatchFetcher::new(
        Arc::new(HttpTransport::direct()),
        upstream.uri(),
        fast_policy(),
    );
    Orchestrator::new(
        Arc::new(relay),
        fallback,
        shared(CacheStore::new(50, DEFAULT_TTL)),
        None,
    )
}

// == Relay Path ==

#[tokio::test]
async fn test_images_served_through_relay() {
    let upstream = image_host(200).await;
    let relay_base = spawn_relay(&upstream).await;
    let orch = orchestrator(&relay_base, &upstream);

    orch.request_images(3).await;

    let view = orch.view();
    assert_eq!(view.images.len(), 3);
    assert!(view.error.is_none());
    assert!(!view.loading);
    for image in &view.images {
        assert!(image.url.starts_with(&format!("{}/cat?t=", upstream.uri())));
    }
}

#[tokio::test]
async fn test_second_request_served_from_cache() {
    let upstream = image_host(200).await;
    let relay = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/cat-images"))
        .and(query_param("count", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": [
                { "id": "cat-1-aaaaaaaaa", "url": "https://cataas.com/cat?t=1-aaaaaaaaa", "timestamp": 1 },
                { "id": "cat-2-bbbbbbbbb", "url": "https://cataas.com/cat?t=2-bbbbbbbbb", "timestamp": 2 }
            ],
            "count": 2
        })))
        .expect(1)
        .mount(&relay)
        .await;

    let orch = orchestrator(&relay.uri(), &upstream);
    orch.request_images(2).await;
    orch.request_images(2).await;

    let images = orch.images();
    assert_eq!(images.len(), 2);
    assert_eq!(images[0].id, "cat-1-aaaaaaaaa");
    // `expect(1)` is verified when the relay mock drops
}

#[tokio::test]
async fn test_refetch_hits_network_again() {
    let upstream = image_host(200).await;
    let relay_base = spawn_relay(&upstream).await;
    let orch = orchestrator(&relay_base, &upstream);

    orch.request_images(2).await;
    let before = upstream.received_requests().await.unwrap().len();

    orch.refetch().await;
    let after = upstream.received_requests().await.unwrap().len();

    assert!(after > before);
    assert_eq!(orch.images().len(), 2);
}

// == Fallback Path ==

#[tokio::test]
async fn test_relay_error_falls_back_to_direct_fetch() {
    let upstream = image_host(200).await;
    let relay = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/cat-images"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&relay)
        .await;

    let orch = orchestrator(&relay.uri(), &upstream);
    orch.request_images(4).await;

    assert_eq!(orch.images().len(), 4);
    assert!(orch.error().is_none());
    assert_eq!(upstream.received_requests().await.unwrap().len(), 4);
}

#[tokio::test]
async fn test_unreachable_relay_falls_back() {
    let upstream = image_host(200).await;
    // Nothing listens on a freshly released port
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let orch = orchestrator(&format!("http://127.0.0.1:{}", port), &upstream);
    orch.request_images(1).await;

    assert_eq!(orch.images().len(), 1);
    assert!(orch.error().is_none());
}

#[tokio::test]
async fn test_everything_down_sets_error() {
    let upstream = image_host(503).await;
    let relay_base = spawn_relay(&upstream).await;
    let orch = orchestrator(&relay_base, &upstream);

    orch.request_images(2).await;

    let view = orch.view();
    assert!(view.images.is_empty());
    assert!(!view.loading);
    let message = view.error.unwrap();
    assert!(message.contains("Failed to fetch any cat images"));
    assert!(message.contains("HTTP error! status: 503"));
}
