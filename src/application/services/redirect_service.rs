//! Short code resolution service.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::entities::ShortUrlRecord;
use crate::domain::repositories::ShortUrlRepository;
use crate::error::AppError;

/// Service resolving short codes to their target URLs.
pub struct RedirectService {
    repository: Arc<dyn ShortUrlRepository>,
}

impl RedirectService {
    /// Creates a new redirect service.
    pub fn new(repository: Arc<dyn ShortUrlRepository>) -> Self {
        Self { repository }
    }

    /// Resolves a short code and counts the click.
    ///
    /// The click counter is best-effort: if the increment fails the failure is
    /// logged and the target URL is still returned.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the code was never issued
    /// - [`AppError::StorageUnavailable`] if the lookup itself fails
    pub async fn resolve(&self, short_code: &str) -> Result<String, AppError> {
        let record = self.lookup(short_code).await?;

        self.record_click(&record).await;

        Ok(record.long_url)
    }

    /// Fetches the record for a short code without counting a click.
    ///
    /// # Errors
    ///
    /// Same as [`Self::resolve`].
    pub async fn lookup(&self, short_code: &str) -> Result<ShortUrlRecord, AppError> {
        self.repository
            .find_by_short_code(short_code)
            .await
            .map_err(|e| AppError::storage("find_by_short_code", short_code, e))?
            .ok_or(AppError::NotFound)
    }

    async fn record_click(&self, record: &ShortUrlRecord) {
        match self.repository.increment_clicks(record).await {
            Ok(updated) => {
                debug!(code = %updated.short_code, clicks = updated.clicks, "Click recorded");
            }
            Err(e) => {
                warn!(
                    operation = "increment_clicks",
                    code = %record.short_code,
                    error = %e,
                    "Failed to record click"
                );
            }
        }
    }
}
