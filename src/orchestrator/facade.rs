//! Orchestrator Facade
//!
//! Cache lookup, supersession, relay call and direct fallback for one
//! consumer of cat image batches.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::{watch, Mutex};
use tracing::{debug, error, info, warn};

use crate::cache::{cache_key, shared, CacheStats, CacheStore, SharedCache};
use crate::config::Config;
use crate::error::Result;
use crate::fetch::BatchFetcher;
use crate::models::{ImageRecord, DEFAULT_COUNT, MAX_COUNT, MIN_COUNT};
use crate::orchestrator::{ImagesView, RequestState};
use crate::relay::{HttpRelay, ImageRelay};

/// Fetch orchestration facade.
///
/// Cheap to clone; clones share state. At most one request is current at a
/// time: starting a request cancels the previous one, and a superseded
/// request's completion is discarded.
#[derive(Clone)]
pub struct Orchestrator {
    inner: Arc<Inner>,
}

struct Inner {
    relay: Arc<dyn ImageRelay>,
    fallback: BatchFetcher,
    cache: SharedCache,
    state: Mutex<RequestState>,
    view: watch::Sender<ImagesView>,
    last_count: AtomicUsize,
    next_id: AtomicU64,
}

impl Orchestrator {
    /// Creates an orchestrator.
    ///
    /// `initial` seeds the exposed images, e.g. with a batch rendered
    /// server-side.
    pub fn new(
        relay: Arc<dyn ImageRelay>,
        fallback: BatchFetcher,
        cache: SharedCache,
        initial: Option<Vec<ImageRecord>>,
    ) -> Self {
        let state = RequestState::with_results(initial.unwrap_or_default());
        let (view, _) = watch::channel(state.view());

        Self {
            inner: Arc::new(Inner {
                relay,
                fallback,
                cache,
                state: Mutex::new(state),
                view,
                last_count: AtomicUsize::new(DEFAULT_COUNT),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    /// HTTP relay, direct fallback and a fresh cache, all from `config`.
    pub fn from_config(config: &Config) -> Self {
        let cache = shared(CacheStore::new(config.cache_max_entries, config.cache_ttl()));
        Self::new(
            Arc::new(HttpRelay::from_config(config)),
            BatchFetcher::direct(config),
            cache,
            None,
        )
    }

    // == Request Images ==
    /// Loads a batch of `count` images (clamped to `[1, 5]`).
    ///
    /// A valid cache entry is applied immediately without entering Loading.
    /// Otherwise the relay is asked first and, unless the request was
    /// cancelled, the direct fetcher is tried when the relay fails. Only
    /// when both paths fail does the error become visible.
    pub async fn request_images(&self, count: usize) {
        let count = count.clamp(MIN_COUNT, MAX_COUNT);
        self.inner.last_count.store(count, Ordering::SeqCst);
        let key = cache_key(count);

        let cached = self.inner.cache.write().await.get(&key);
        if let Some(entry) = cached {
            debug!("Cache hit for {}", key);
            let mut state = self.inner.state.lock().await;
            state.apply_cached(entry.images);
            self.publish(&state);
            return;
        }

        let id = self.inner.next_id.fetch_add(1, Ordering::SeqCst);
        let cancel = {
            let mut state = self.inner.state.lock().await;
            let cancel = state.begin(id);
            self.publish(&state);
            cancel
        };
        debug!("Request {} started for {}", id, key);

        let result = match self.inner.relay.fetch_images(count, &cancel).await {
            Ok(images) => Ok(images),
            Err(err) if err.is_cancelled() => {
                debug!("Request {} superseded during relay call", id);
                return;
            }
            Err(err) => {
                warn!("Relay failed, falling back to direct fetch: {}", err);
                self.inner.fallback.fetch_images(count, &cancel).await
            }
        };

        self.settle(id, &key, result).await;
    }

    // == Refetch ==
    /// Clears the results and the whole cache, then requests the last
    /// requested count again. Always performs a network round trip.
    pub async fn refetch(&self) {
        {
            let mut state = self.inner.state.lock().await;
            state.results.clear();
            self.publish(&state);
        }
        self.inner.cache.write().await.clear();

        let count = self.inner.last_count.load(Ordering::SeqCst);
        self.request_images(count).await;
    }

    async fn settle(&self, id: u64, key: &str, result: Result<Vec<ImageRecord>>) {
        let mut state = self.inner.state.lock().await;
        if !state.is_current(id) {
            debug!("Discarding result of superseded request {}", id);
            return;
        }

        match result {
            Ok(images) => {
                info!("Loaded {} cat images", images.len());
                self.inner.cache.write().await.put(key, images.clone());
                state.succeed(images);
            }
            Err(err) if err.is_cancelled() => {
                debug!("Request {} cancelled", id);
                return;
            }
            Err(err) => {
                error!("Error fetching cat images: {}", err);
                state.fail(err.to_string());
            }
        }
        self.publish(&state);
    }

    fn publish(&self, state: &RequestState) {
        self.inner.view.send_replace(state.view());
    }

    // == Accessors ==
    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<ImagesView> {
        self.inner.view.subscribe()
    }

    pub fn view(&self) -> ImagesView {
        self.inner.view.borrow().clone()
    }

    pub fn images(&self) -> Vec<ImageRecord> {
        self.inner.view.borrow().images.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.view.borrow().loading
    }

    pub fn error(&self) -> Option<String> {
        self.inner.view.borrow().error.clone()
    }

    /// Handle to the cache, for sharing with other orchestrators.
    pub fn cache(&self) -> SharedCache {
        self.inner.cache.clone()
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.inner.cache.read().await.stats()
    }
}
