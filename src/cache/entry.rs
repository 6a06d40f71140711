//! Cache Entry Module
//!
//! One cached batch with the time it was stored and its TTL.

use std::time::Duration;

use crate::models::{now_ms, ImageRecord};

// == Cache Entry ==
/// A cached batch. Immutable once stored.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub key: String,
    pub images: Vec<ImageRecord>,
    /// Store timestamp (Unix milliseconds)
    pub stored_at: i64,
    pub ttl: Duration,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry stored now.
    pub fn new(key: impl Into<String>, images: Vec<ImageRecord>, ttl: Duration) -> Self {
        Self {
            key: key.into(),
            images,
            stored_at: now_ms(),
            ttl,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Valid while `now - stored_at <= ttl`; the boundary millisecond still
    /// counts as valid.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(now_ms())
    }

    /// Expiry check against an explicit clock reading.
    pub fn is_expired_at(&self, now: i64) -> bool {
        now.saturating_sub(self.stored_at) > self.ttl_ms()
    }

    fn ttl_ms(&self) -> i64 {
        i64::try_from(self.ttl.as_millis()).unwrap_or(i64::MAX)
    }
}
