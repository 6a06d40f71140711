//! Retry Policy Module
//!
//! Per-attempt timeout and exponential backoff schedule for image fetches.

use std::time::Duration;

// == Retry Policy ==
/// Timeout and retry parameters for a single image fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Deadline for each attempt
    pub timeout: Duration,
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Delay before the first retry
    pub backoff_base: Duration,
    /// Upper bound for any single delay
    pub backoff_cap: Duration,
}

impl RetryPolicy {
    /// Policy for the direct client path (10s per attempt).
    pub fn client() -> Self {
        Self::default()
    }

    /// Policy for the relay endpoint (5s per attempt).
    pub fn server() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            ..Self::default()
        }
    }

    /// Returns a copy with a different retry count.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    // == Backoff ==
    /// Delay after the failed attempt numbered `attempt` (0-based):
    /// `min(base * 2^attempt, cap)`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
        self.backoff_base
            .checked_mul(factor)
            .map_or(self.backoff_cap, |delay| delay.min(self.backoff_cap))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            max_retries: 3,
            backoff_base: Duration::from_millis(1000),
            backoff_cap: Duration::from_millis(5000),
        }
    }
}
