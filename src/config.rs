//! Configuration Module
//!
//! Handles loading relay server and fetch orchestration settings from
//! environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::fetch::RetryPolicy;

/// Runtime configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the upstream image host
    pub upstream_base_url: String,
    /// Base URL the orchestrator uses to reach the relay server
    pub relay_base_url: String,
    /// HTTP server port
    pub server_port: u16,
    /// Per-attempt timeout on the server relay path, in milliseconds
    pub server_timeout_ms: u64,
    /// Per-attempt timeout on the direct client path, in milliseconds
    pub client_timeout_ms: u64,
    /// Deadline for a whole relay round trip, in milliseconds
    pub relay_timeout_ms: u64,
    /// Retries after the first attempt of a single image fetch
    pub max_retries: u32,
    /// Exponential backoff base in milliseconds
    pub backoff_base_ms: u64,
    /// Upper bound for a single backoff delay in milliseconds
    pub backoff_cap_ms: u64,
    /// Maximum number of batches the cache can hold
    pub cache_max_entries: usize,
    /// TTL in seconds for cached batches
    pub cache_ttl_secs: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `UPSTREAM_BASE_URL` - Image host (default: https://cataas.com)
    /// - `RELAY_BASE_URL` - Relay server location (default: http://127.0.0.1:3000)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `SERVER_TIMEOUT_MS` - Relay per-attempt timeout (default: 5000)
    /// - `CLIENT_TIMEOUT_MS` - Direct per-attempt timeout (default: 10000)
    /// - `RELAY_TIMEOUT_MS` - Relay round-trip deadline (default: 30000)
    /// - `MAX_RETRIES` - Retries per image (default: 3)
    /// - `BACKOFF_BASE_MS` - Backoff base (default: 1000)
    /// - `BACKOFF_CAP_MS` - Backoff cap (default: 5000)
    /// - `CACHE_MAX_ENTRIES` - Cached batches (default: 50)
    /// - `CACHE_TTL_SECS` - Cached batch lifetime (default: 300)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            upstream_base_url: env::var("UPSTREAM_BASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.upstream_base_url),
            relay_base_url: env::var("RELAY_BASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.relay_base_url),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            server_timeout_ms: parse_var("SERVER_TIMEOUT_MS")
                .unwrap_or(defaults.server_timeout_ms),
            client_timeout_ms: parse_var("CLIENT_TIMEOUT_MS")
                .unwrap_or(defaults.client_timeout_ms),
            relay_timeout_ms: parse_var("RELAY_TIMEOUT_MS").unwrap_or(defaults.relay_timeout_ms),
            max_retries: parse_var("MAX_RETRIES").unwrap_or(defaults.max_retries),
            backoff_base_ms: parse_var("BACKOFF_BASE_MS").unwrap_or(defaults.backoff_base_ms),
            backoff_cap_ms: parse_var("BACKOFF_CAP_MS").unwrap_or(defaults.backoff_cap_ms),
            cache_max_entries: parse_var("CACHE_MAX_ENTRIES")
                .unwrap_or(defaults.cache_max_entries),
            cache_ttl_secs: parse_var("CACHE_TTL_SECS").unwrap_or(defaults.cache_ttl_secs),
        }
    }

    /// Retry policy for the server relay path.
    pub fn server_policy(&self) -> RetryPolicy {
        self.policy(self.server_timeout_ms)
    }

    /// Retry policy for the direct client path.
    pub fn client_policy(&self) -> RetryPolicy {
        self.policy(self.client_timeout_ms)
    }

    /// Deadline for one call to the relay endpoint.
    pub fn relay_timeout(&self) -> Duration {
        Duration::from_millis(self.relay_timeout_ms)
    }

    /// Lifetime of a cached batch.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    fn policy(&self, timeout_ms: u64) -> RetryPolicy {
        RetryPolicy {
            timeout: Duration::from_millis(timeout_ms),
            max_retries: self.max_retries,
            backoff_base: Duration::from_millis(self.backoff_base_ms),
            backoff_cap: Duration::from_millis(self.backoff_cap_ms),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            upstream_base_url: "https://cataas.com".to_string(),
            relay_base_url: "http://127.0.0.1:3000".to_string(),
            server_port: 3000,
            server_timeout_ms: 5_000,
            client_timeout_ms: 10_000,
            relay_timeout_ms: 30_000,
            max_retries: 3,
            backoff_base_ms: 1_000,
            backoff_cap_ms: 5_000,
            cache_max_entries: 50,
            cache_ttl_secs: 300,
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
