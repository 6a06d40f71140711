//! API Module
//!
//! HTTP handlers and routing for the relay server.
//!
//! # Endpoints
//! - `GET /api/cat-images?count=N` - Fetch a batch of 1 to 5 cat images
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
