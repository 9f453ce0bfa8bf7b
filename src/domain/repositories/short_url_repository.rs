//! Repository trait for short URL record storage.

use crate::domain::entities::{NewShortUrl, ShortUrlRecord};
use crate::error::StoreError;
use async_trait::async_trait;

/// Storage interface for short URL records.
///
/// Any keyed storage backend can implement this. Every method is an I/O
/// suspend point and may fail with [`StoreError::Unavailable`] or
/// [`StoreError::Timeout`].
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgShortUrlRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryShortUrlRepository`] - Process-local maps
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortUrlRepository: Send + Sync {
    /// Finds a record by its original long URL.
    ///
    /// Used by the shortening flow to return an existing code instead of
    /// issuing a new one. Uniqueness of `long_url` is not enforced, so when
    /// several records match, any one of them may be returned.
    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<ShortUrlRecord>, StoreError>;

    /// Finds a record by its short code.
    async fn find_by_short_code(
        &self,
        short_code: &str,
    ) -> Result<Option<ShortUrlRecord>, StoreError>;

    /// Persists a new record with `clicks = 0`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateKey`] if the short code already exists.
    async fn insert(&self, new_record: NewShortUrl) -> Result<ShortUrlRecord, StoreError>;

    /// Adds one click to the record and returns the updated record.
    ///
    /// Callers may only rely on the counter being approximate: under
    /// concurrent redirects for the same code an increment may be lost.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the record no longer exists.
    async fn increment_clicks(&self, record: &ShortUrlRecord) -> Result<ShortUrlRecord, StoreError>;

    /// Checks that the backend is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
