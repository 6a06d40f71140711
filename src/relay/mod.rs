//! Relay Client Module
//!
//! The orchestrator's primary path: asks the relay endpoint for a batch.

mod client;

pub use client::{HttpRelay, ImageRelay};
