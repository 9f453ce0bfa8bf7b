#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use std::sync::Arc;
use url_shortener::application::services::DEFAULT_MAX_CODE_ATTEMPTS;
use url_shortener::domain::entities::{NewShortUrl, ShortUrlRecord};
use url_shortener::domain::repositories::ShortUrlRepository;
use url_shortener::error::StoreError;
use url_shortener::infrastructure::persistence::InMemoryShortUrlRepository;
use axum::ServiceExt;
use axum::extract::Request;
use url_shortener::routes::{app_router, app_routes};
use url_shortener::state::AppState;

pub const TEST_HOST: &str = "s.example.com";

/// State backed by a fresh in-memory store, returned alongside the store.
pub fn create_test_state() -> (AppState, Arc<InMemoryShortUrlRepository>) {
    create_test_state_with_base(None)
}

pub fn create_test_state_with_base(
    base_url: Option<&str>,
) -> (AppState, Arc<InMemoryShortUrlRepository>) {
    let repo = Arc::new(InMemoryShortUrlRepository::new());
    let state = AppState::new(
        repo.clone(),
        DEFAULT_MAX_CODE_ATTEMPTS,
        base_url.map(str::to_string),
    );

    (state, repo)
}

pub fn create_test_server(state: AppState) -> TestServer {
    TestServer::new(app_routes(state)).unwrap()
}

/// Server over the full service, including trailing-slash normalization.
pub fn create_normalized_test_server(state: AppState) -> TestServer {
    TestServer::new(ServiceExt::<Request>::into_make_service(app_router(state))).unwrap()
}

pub async fn create_test_record(
    repo: &InMemoryShortUrlRepository,
    code: &str,
    url: &str,
) -> ShortUrlRecord {
    repo.insert(NewShortUrl::new(url, code)).await.unwrap()
}

/// Repository whose every operation fails as if the backend were down.
pub struct UnavailableRepository;

fn down() -> StoreError {
    StoreError::Unavailable("connection refused".to_string())
}

#[async_trait]
impl ShortUrlRepository for UnavailableRepository {
    async fn find_by_long_url(&self, _long_url: &str) -> Result<Option<ShortUrlRecord>, StoreError> {
        Err(down())
    }

    async fn find_by_short_code(
        &self,
        _short_code: &str,
    ) -> Result<Option<ShortUrlRecord>, StoreError> {
        Err(down())
    }

    async fn insert(&self, _new_record: NewShortUrl) -> Result<ShortUrlRecord, StoreError> {
        Err(down())
    }

    async fn increment_clicks(&self, _record: &ShortUrlRecord) -> Result<ShortUrlRecord, StoreError> {
        Err(down())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(down())
    }
}

pub fn create_unavailable_state() -> AppState {
    AppState::new(Arc::new(UnavailableRepository), DEFAULT_MAX_CODE_ATTEMPTS, None)
}

/// Extracts the short code from a `shortUrl` value.
pub fn code_of(short_url: &str) -> String {
    short_url.rsplit('/').next().unwrap().to_string()
}
