//! Cache Store Module
//!
//! Batch cache combining HashMap storage with insertion-order eviction and
//! lazy TTL expiry.

use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, InsertionOrder, DEFAULT_MAX_ENTRIES, DEFAULT_TTL};
use crate::models::ImageRecord;

// == Cache Store ==
/// Key to batch mapping, bounded to `max_entries`.
#[derive(Debug)]
pub struct CacheStore {
    entries: HashMap<String, CacheEntry>,
    order: InsertionOrder,
    stats: CacheStats,
    max_entries: usize,
    default_ttl: Duration,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore with specified capacity and TTL.
    pub fn new(max_entries: usize, default_ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            order: InsertionOrder::new(),
            stats: CacheStats::new(),
            max_entries,
            default_ttl,
        }
    }

    // == Get ==
    /// Returns the batch stored under `key` if it has not expired.
    ///
    /// An expired entry is removed and the read counts as a miss.
    pub fn get(&mut self, key: &str) -> Option<CacheEntry> {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            self.remove(key);
            self.stats.record_expiration();
            debug!("Cache entry {} expired", key);
            return None;
        }

        self.stats.record_hit();
        self.entries.get(key).cloned()
    }

    // == Put ==
    /// Stores `images` under `key` with the default TTL.
    pub fn put(&mut self, key: impl Into<String>, images: Vec<ImageRecord>) {
        let ttl = self.default_ttl;
        self.put_with_ttl(key, images, ttl);
    }

    /// Stores `images` under `key` with an explicit TTL.
    ///
    /// An existing entry for `key` is deleted first. Otherwise, when the
    /// store is full, the oldest insertion is evicted to make room.
    pub fn put_with_ttl(
        &mut self,
        key: impl Into<String>,
        images: Vec<ImageRecord>,
        ttl: Duration,
    ) {
        let key = key.into();
        if self.max_entries == 0 {
            return;
        }

        if !self.remove(&key) && self.entries.len() >= self.max_entries {
            if let Some(evicted) = self.order.evict_oldest() {
                self.entries.remove(&evicted);
                self.stats.record_eviction();
                debug!("Cache full, evicted {}", evicted);
            }
        }

        self.order.push(&key);
        self.entries.insert(key.clone(), CacheEntry::new(key, images, ttl));
    }

    // == Delete ==
    /// Removes the entry under `key`. Returns whether one was present.
    pub fn delete(&mut self, key: &str) -> bool {
        self.remove(key)
    }

    // == Clear ==
    /// Empties the store. Statistics are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.entries = self.entries.len();
        stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn remove(&mut self, key: &str) -> bool {
        if self.entries.remove(key).is_some() {
            self.order.remove(key);
            true
        } else {
            false
        }
    }
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES, DEFAULT_TTL)
    }
}
