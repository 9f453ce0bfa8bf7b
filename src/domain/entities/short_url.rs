//! Short URL entity representing a long URL mapped to a short code.

use chrono::{DateTime, Utc};

/// A stored mapping between a short code and its target URL.
///
/// `short_code` is unique across all records. `clicks` only grows, once per
/// successful redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortUrlRecord {
    pub id: i64,
    pub long_url: String,
    pub short_code: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
}

impl ShortUrlRecord {
    /// Creates a new ShortUrlRecord instance.
    pub fn new(
        id: i64,
        long_url: String,
        short_code: String,
        clicks: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            long_url,
            short_code,
            clicks,
            created_at,
        }
    }
}

/// Input data for creating a new record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortUrl {
    pub long_url: String,
    pub short_code: String,
}

impl NewShortUrl {
    pub fn new(long_url: impl Into<String>, short_code: impl Into<String>) -> Self {
        Self {
            long_url: long_url.into(),
            short_code: short_code.into(),
        }
    }
}
