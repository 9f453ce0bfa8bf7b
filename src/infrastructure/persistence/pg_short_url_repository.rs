//! PostgreSQL implementation of the short URL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::{NewShortUrl, ShortUrlRecord};
use crate::domain::repositories::ShortUrlRepository;
use crate::error::StoreError;
use crate::utils::db_error::{map_insert_error, map_sqlx_error};

/// Upper bound for a single query unless configured otherwise.
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(sqlx::FromRow)]
struct ShortUrlRow {
    id: i64,
    long_url: String,
    short_code: String,
    clicks: i64,
    created_at: DateTime<Utc>,
}

impl From<ShortUrlRow> for ShortUrlRecord {
    fn from(row: ShortUrlRow) -> Self {
        ShortUrlRecord::new(row.id, row.long_url, row.short_code, row.clicks, row.created_at)
    }
}

/// PostgreSQL repository for short URL records.
///
/// Every query runs under a timeout; an expired timeout is reported as
/// [`StoreError::Timeout`]. Each statement is atomic, but one that timed out
/// may still have been applied by the server.
pub struct PgShortUrlRepository {
    pool: Arc<PgPool>,
    query_timeout: Duration,
}

impl PgShortUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self::with_timeout(pool, DEFAULT_QUERY_TIMEOUT)
    }

    /// Creates a repository with an explicit per-query timeout.
    pub fn with_timeout(pool: Arc<PgPool>, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }

    async fn bounded<T, F>(&self, query: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.query_timeout, query).await {
            Ok(result) => result.map_err(map_sqlx_error),
            Err(_) => Err(StoreError::Timeout(self.query_timeout)),
        }
    }
}

#[async_trait]
impl ShortUrlRepository for PgShortUrlRepository {
    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<ShortUrlRecord>, StoreError> {
        let row = self
            .bounded(
                sqlx::query_as::<_, ShortUrlRow>(
                    r#"
                    SELECT id, long_url, short_code, clicks, created_at
                    FROM short_urls
                    WHERE md5(long_url) = md5($1) AND long_url = $1
                    ORDER BY id
                    LIMIT 1
                    "#,
                )
                .bind(long_url)
                .fetch_optional(self.pool.as_ref()),
            )
            .await?;

        Ok(row.map(ShortUrlRecord::from))
    }

    async fn find_by_short_code(
        &self,
        short_code: &str,
    ) -> Result<Option<ShortUrlRecord>, StoreError> {
        let row = self
            .bounded(
                sqlx::query_as::<_, ShortUrlRow>(
                    r#"
                    SELECT id, long_url, short_code, clicks, created_at
                    FROM short_urls
                    WHERE short_code = $1
                    "#,
                )
                .bind(short_code)
                .fetch_optional(self.pool.as_ref()),
            )
            .await?;

        Ok(row.map(ShortUrlRecord::from))
    }

    async fn insert(&self, new_record: NewShortUrl) -> Result<ShortUrlRecord, StoreError> {
        let query = sqlx::query_as::<_, ShortUrlRow>(
            r#"
            INSERT INTO short_urls (long_url, short_code)
            VALUES ($1, $2)
            RETURNING id, long_url, short_code, clicks, created_at
            "#,
        )
        .bind(&new_record.long_url)
        .bind(&new_record.short_code)
        .fetch_one(self.pool.as_ref());

        match tokio::time::timeout(self.query_timeout, query).await {
            Ok(Ok(row)) => Ok(row.into()),
            Ok(Err(e)) => Err(map_insert_error(e, &new_record.short_code)),
            Err(_) => Err(StoreError::Timeout(self.query_timeout)),
        }
    }

    async fn increment_clicks(&self, record: &ShortUrlRecord) -> Result<ShortUrlRecord, StoreError> {
        let row = self
            .bounded(
                sqlx::query_as::<_, ShortUrlRow>(
                    r#"
                    UPDATE short_urls
                    SET clicks = clicks + 1
                    WHERE short_code = $1
                    RETURNING id, long_url, short_code, clicks, created_at
                    "#,
                )
                .bind(&record.short_code)
                .fetch_optional(self.pool.as_ref()),
            )
            .await?;

        row.map(ShortUrlRecord::from)
            .ok_or_else(|| StoreError::NotFound(record.short_code.clone()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.bounded(sqlx::query("SELECT 1").execute(self.pool.as_ref()))
            .await
            .map(|_| ())
    }
}
