//! Short code creation service.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::entities::{NewShortUrl, ShortUrlRecord};
use crate::domain::repositories::ShortUrlRepository;
use crate::error::{AppError, StoreError};
use crate::utils::code_generator::{CodeGenerator, RandomCodeGenerator, is_reserved_code};
use crate::utils::url_validator::is_valid_url;

/// Attempts at finding a free code before giving up.
pub const DEFAULT_MAX_CODE_ATTEMPTS: usize = 10;

/// Service for turning long URLs into short codes.
///
/// Shortening is get-or-create: a long URL that is already stored gets its
/// existing code back. The existence check and the insert are separate store
/// calls, so two concurrent first-time requests for the same URL may both
/// insert; both resulting codes stay valid.
pub struct ShortenService {
    repository: Arc<dyn ShortUrlRepository>,
    generator: Arc<dyn CodeGenerator>,
    max_attempts: usize,
}

impl ShortenService {
    /// Creates a service using the random code generator.
    pub fn new(repository: Arc<dyn ShortUrlRepository>) -> Self {
        Self::with_generator(
            repository,
            Arc::new(RandomCodeGenerator),
            DEFAULT_MAX_CODE_ATTEMPTS,
        )
    }

    /// Creates a service with an explicit generator and collision retry bound.
    ///
    /// A bound of zero is raised to one.
    pub fn with_generator(
        repository: Arc<dyn ShortUrlRepository>,
        generator: Arc<dyn CodeGenerator>,
        max_attempts: usize,
    ) -> Self {
        Self {
            repository,
            generator,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Returns the record for `long_url`, creating it if needed.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidUrl`] if the URL fails validation (nothing is stored)
    /// - [`AppError::CodeGenerationExhausted`] if every attempt collided
    /// - [`AppError::StorageUnavailable`] on store failures
    pub async fn shorten(&self, long_url: &str) -> Result<ShortUrlRecord, AppError> {
        if !is_valid_url(long_url) {
            return Err(AppError::InvalidUrl);
        }

        if let Some(existing) = self
            .repository
            .find_by_long_url(long_url)
            .await
            .map_err(|e| AppError::storage("find_by_long_url", long_url, e))?
        {
            debug!("Reusing code {} for {}", existing.short_code, long_url);
            return Ok(existing);
        }

        self.insert_with_fresh_code(long_url).await
    }

    /// Joins a public base URL and a short code.
    pub fn short_url(base: &str, code: &str) -> String {
        format!("{}/{}", base.trim_end_matches('/'), code)
    }

    async fn insert_with_fresh_code(&self, long_url: &str) -> Result<ShortUrlRecord, AppError> {
        for attempt in 1..=self.max_attempts {
            let code = self.generator.generate();

            if is_reserved_code(&code) {
                debug!(attempt, code = %code, "Generated reserved code, retrying");
                continue;
            }

            match self
                .repository
                .insert(NewShortUrl::new(long_url, code.clone()))
                .await
            {
                Ok(record) => {
                    info!(code = %record.short_code, long_url = %record.long_url, "Short URL created");
                    return Ok(record);
                }
                Err(StoreError::DuplicateKey(_)) => {
                    debug!(attempt, code = %code, "Short code collision, retrying");
                }
                Err(e) => return Err(AppError::storage("insert", code, e)),
            }
        }

        Err(AppError::CodeGenerationExhausted {
            attempts: self.max_attempts,
        })
    }
}
