//! Cache Statistics Module
//!
//! Counters for batch cache lookups and evictions.

// == Cache Stats ==
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheStats {
    /// Lookups answered from a valid entry
    pub hits: u64,
    /// Lookups with no valid entry, expired ones included
    pub misses: u64,
    /// Entries dropped lazily because their TTL had elapsed
    pub expirations: u64,
    /// Entries dropped to make room
    pub evictions: u64,
    /// Batches currently stored
    pub entries: usize,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// An expired read is also a miss.
    pub fn record_expiration(&mut self) {
        self.expirations += 1;
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }
}
