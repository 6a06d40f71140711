//! Cache Module
//!
//! Bounded in-memory cache of image batches keyed by requested count, with
//! lazy TTL expiry and insertion-order eviction.

mod entry;
mod fifo;
mod stats;
mod store;


use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

// Re-export public types
pub use entry::CacheEntry;
pub(crate) use fifo::InsertionOrder;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Default number of batches held before eviction
pub const DEFAULT_MAX_ENTRIES: usize = 50;

/// Default lifetime of a cached batch
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Cache store shared between the orchestrators of one process.
pub type SharedCache = Arc<RwLock<CacheStore>>;

/// Wraps a store for sharing.
pub fn shared(store: CacheStore) -> SharedCache {
    Arc::new(RwLock::new(store))
}

/// Cache key for a batch of `count` images.
pub fn cache_key(count: usize) -> String {
    format!("count-{}", count)
}
