//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{RedirectService, ShortenService};
use crate::domain::repositories::ShortUrlRepository;
use crate::utils::code_generator::RandomCodeGenerator;

/// Handles to the services built around one store instance.
#[derive(Clone)]
pub struct AppState {
    pub shorten_service: Arc<ShortenService>,
    pub redirect_service: Arc<RedirectService>,
    /// Store handle used for health checks.
    pub repository: Arc<dyn ShortUrlRepository>,
    /// Public base for returned short URLs; the request host is used when unset.
    pub base_url: Option<String>,
}

impl AppState {
    /// Builds services on top of `repository`.
    pub fn new(
        repository: Arc<dyn ShortUrlRepository>,
        max_code_attempts: usize,
        base_url: Option<String>,
    ) -> Self {
        let shorten_service = Arc::new(ShortenService::with_generator(
            repository.clone(),
            Arc::new(RandomCodeGenerator),
            max_code_attempts,
        ));
        let redirect_service = Arc::new(RedirectService::new(repository.clone()));

        Self {
            shorten_service,
            redirect_service,
            repository,
            base_url,
        }
    }
}
