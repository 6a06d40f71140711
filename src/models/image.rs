//! Image Record Module
//!
//! One fetched image's identity, location, and fetch time.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Length of the random suffix in a uniqueness token
const SUFFIX_LEN: usize = 9;

// == Image Record ==
/// A single fetched image. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Unique per fetch attempt, `cat-<token>`
    pub id: String,
    /// Upstream resource locator including the uniqueness token
    pub url: String,
    /// Creation time (Unix milliseconds)
    pub timestamp: i64,
}

impl ImageRecord {
    /// Builds the record for a successful fetch of `url` made with `token`.
    pub fn new(token: &str, url: impl Into<String>) -> Self {
        Self {
            id: format!("cat-{}", token),
            url: url.into(),
            timestamp: now_ms(),
        }
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generates `<ms-epoch>-<9 lowercase base36 chars>`.
///
/// Appended to upstream URLs so repeated calls neither collide nor get
/// served from an intermediate cache.
pub fn unique_token() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..SUFFIX_LEN)
        .filter_map(|_| std::char::from_digit(rng.gen_range(0..36), 36))
        .collect();
    format!("{}-{}", now_ms(), suffix)
}

/// Upstream image URL for `token` under `base_url`.
pub fn image_url(base_url: &str, token: &str) -> String {
    format!("{}/cat?t={}", base_url.trim_end_matches('/'), token)
}
