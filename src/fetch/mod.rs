//! Fetch Module
//!
//! Single-image fetch with timeout, cancellation and exponential backoff,
//! and the batch fan-out shared by the relay endpoint and the direct
//! client path. The two paths differ only in the `ImageTransport` used.

mod batch;
mod one;
mod retry;
mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use batch::{BatchFailure, BatchFetcher, BatchOutcome};
pub use one::fetch_one;
pub use retry::RetryPolicy;
pub use transport::{HttpTransport, ImageTransport};
