//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, Uri},
};
use tracing::debug;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::application::services::ShortenService;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::request_host::request_host;

/// Creates (or returns the existing) short URL for a long URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// { "longUrl": "https://example.com/a?b=1" }
/// ```
///
/// # Response
///
/// ```json
/// { "shortUrl": "http://localhost:3000/aB3xY9" }
/// ```
///
/// The base is `BASE_URL` when configured, otherwise `http://` plus the
/// request host.
///
/// # Errors
///
/// - 400 `Invalid URL` if `longUrl` is missing or fails validation
/// - 400 if the body is not JSON or no host can be determined
/// - 500 `Server error` on storage failures
pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        debug!("Rejected shorten body: {}", rejection.body_text());
        AppError::bad_request("Invalid request body")
    })?;

    let record = state.shorten_service.shorten(payload.long_url()).await?;

    let base = match &state.base_url {
        Some(base_url) => base_url.clone(),
        None => format!("http://{}", request_host(&headers, &uri)?),
    };

    Ok(Json(ShortenResponse {
        short_url: ShortenService::short_url(&base, &record.short_code),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::InMemoryShortUrlRepository;
    use serde_json::json;
    use std::sync::Arc;

    fn request(body: serde_json::Value) -> Result<Json<ShortenRequest>, JsonRejection> {
        Ok(Json(serde_json::from_value(body).unwrap()))
    }

    fn state() -> AppState {
        AppState::new(Arc::new(InMemoryShortUrlRepository::new()), 10, None)
    }

    #[tokio::test]
    async fn test_invalid_url_wins_over_missing_host() {
        let result = shorten_handler(
            State(state()),
            HeaderMap::new(),
            Uri::from_static("/shorten"),
            request(json!({ "longUrl": "not-a-url" })),
        )
        .await;

        assert!(matches!(result, Err(AppError::InvalidUrl)));
    }

    #[tokio::test]
    async fn test_valid_url_without_host_is_bad_request() {
        let result = shorten_handler(
            State(state()),
            HeaderMap::new(),
            Uri::from_static("/shorten"),
            request(json!({ "longUrl": "https://example.com" })),
        )
        .await;

        assert!(matches!(result, Err(AppError::BadRequest(message)) if message == "Missing Host header"));
    }
}
