//! In-memory implementation of the short URL repository.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::entities::{NewShortUrl, ShortUrlRecord};
use crate::domain::repositories::ShortUrlRepository;
use crate::error::StoreError;

#[derive(Default)]
struct Tables {
    by_code: HashMap<String, ShortUrlRecord>,
    /// First code issued for each long URL.
    by_long_url: HashMap<String, String>,
    last_id: i64,
}

/// Repository that keeps records in process memory.
///
/// Selected with `DATABASE_URL=memory://`. Nothing survives a restart, which
/// makes it suitable for local development and handler tests only.
#[derive(Default)]
pub struct InMemoryShortUrlRepository {
    tables: RwLock<Tables>,
}

impl InMemoryShortUrlRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        debug!("Using in-memory short URL store");
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.tables.read().await.by_code.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ShortUrlRepository for InMemoryShortUrlRepository {
    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<ShortUrlRecord>, StoreError> {
        let tables = self.tables.read().await;

        Ok(tables
            .by_long_url
            .get(long_url)
            .and_then(|code| tables.by_code.get(code))
            .cloned())
    }

    async fn find_by_short_code(
        &self,
        short_code: &str,
    ) -> Result<Option<ShortUrlRecord>, StoreError> {
        Ok(self.tables.read().await.by_code.get(short_code).cloned())
    }

    async fn insert(&self, new_record: NewShortUrl) -> Result<ShortUrlRecord, StoreError> {
        let mut tables = self.tables.write().await;

        if tables.by_code.contains_key(&new_record.short_code) {
            return Err(StoreError::DuplicateKey(new_record.short_code));
        }

        tables.last_id += 1;
        let record = ShortUrlRecord::new(
            tables.last_id,
            new_record.long_url,
            new_record.short_code,
            0,
            Utc::now(),
        );

        tables
            .by_long_url
            .entry(record.long_url.clone())
            .or_insert_with(|| record.short_code.clone());
        tables
            .by_code
            .insert(record.short_code.clone(), record.clone());

        Ok(record)
    }

    async fn increment_clicks(&self, record: &ShortUrlRecord) -> Result<ShortUrlRecord, StoreError> {
        let mut tables = self.tables.write().await;

        let stored = tables
            .by_code
            .get_mut(&record.short_code)
            .ok_or_else(|| StoreError::NotFound(record.short_code.clone()))?;
        stored.clicks += 1;

        Ok(stored.clone())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_and_find_by_code() {
        let repo = InMemoryShortUrlRepository::new();

        let created = repo
            .insert(NewShortUrl::new("https://example.com", "abc123"))
            .await
            .unwrap();

        assert_eq!(created.id, 1);
        assert_eq!(created.clicks, 0);

        let found = repo.find_by_short_code("abc123").await.unwrap();
        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn test_find_by_long_url() {
        let repo = InMemoryShortUrlRepository::new();
        repo.insert(NewShortUrl::new("https://example.com", "abc123"))
            .await
            .unwrap();

        let found = repo.find_by_long_url("https://example.com").await.unwrap();
        assert_eq!(found.unwrap().short_code, "abc123");

        let missing = repo.find_by_long_url("https://other.com").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_insert_duplicate_code() {
        let repo = InMemoryShortUrlRepository::new();
        repo.insert(NewShortUrl::new("https://example.com", "abc123"))
            .await
            .unwrap();

        let result = repo
            .insert(NewShortUrl::new("https://other.com", "abc123"))
            .await;

        assert!(matches!(result, Err(StoreError::DuplicateKey(code)) if code == "abc123"));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_same_long_url_twice_keeps_first_for_lookup() {
        let repo = InMemoryShortUrlRepository::new();
        repo.insert(NewShortUrl::new("https://example.com", "first1"))
            .await
            .unwrap();
        repo.insert(NewShortUrl::new("https://example.com", "second"))
            .await
            .unwrap();

        let found = repo.find_by_long_url("https://example.com").await.unwrap();
        assert_eq!(found.unwrap().short_code, "first1");
        assert!(repo.find_by_short_code("second").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_increment_clicks() {
        let repo = InMemoryShortUrlRepository::new();
        let record = repo
            .insert(NewShortUrl::new("https://example.com", "abc123"))
            .await
            .unwrap();

        let once = repo.increment_clicks(&record).await.unwrap();
        assert_eq!(once.clicks, 1);

        // A stale copy still increments the stored counter.
        let twice = repo.increment_clicks(&record).await.unwrap();
        assert_eq!(twice.clicks, 2);
    }

    #[tokio::test]
    async fn test_increment_clicks_missing_record() {
        let repo = InMemoryShortUrlRepository::new();
        let ghost = ShortUrlRecord::new(
            9,
            "https://example.com".to_string(),
            "ghost1".to_string(),
            0,
            Utc::now(),
        );

        let result = repo.increment_clicks(&ghost).await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_ping() {
        let repo = InMemoryShortUrlRepository::new();
        assert!(repo.ping().await.is_ok());
        assert!(repo.is_empty().await);
    }
}
