//! Core domain entities.
//!
//! - [`ShortUrlRecord`] - A persisted long URL ↔ short code mapping
//! - [`NewShortUrl`] - Input for creating a record (clicks always start at zero)

pub mod short_url;

pub use short_url::{NewShortUrl, ShortUrlRecord};
