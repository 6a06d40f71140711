//! Data model and request/response DTOs
//!
//! `ImageRecord` is shared by the fetch layers, the cache and the relay
//! endpoint; the remaining types shape HTTP bodies.

pub mod image;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use image::{image_url, now_ms, unique_token, ImageRecord};
pub use requests::{clamp_count, CatImagesQuery, DEFAULT_COUNT, MAX_COUNT, MIN_COUNT};
pub use responses::{CatImagesResponse, HealthResponse};
