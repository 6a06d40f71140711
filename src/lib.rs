//! Cat Sticker - cat image relay and fetch orchestration
//!
//! Serves batches of cat images through a relay endpoint, and provides the
//! orchestrator that consumes it with retry, direct fallback and a TTL
//! batch cache.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod fetch;
pub mod models;
pub mod orchestrator;
pub mod relay;

pub use api::{create_router, AppState};
pub use config::Config;
pub use orchestrator::{ImagesView, Orchestrator};
