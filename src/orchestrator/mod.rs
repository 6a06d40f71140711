//! Orchestrator Module
//!
//! The externally consumed facade: serves batches from the cache, asks the
//! relay, falls back to direct fetching, and exposes the resulting state
//! through polled accessors or a watch subscription.

mod facade;
mod state;


pub use facade::Orchestrator;
pub use state::{ImagesView, RequestState};
