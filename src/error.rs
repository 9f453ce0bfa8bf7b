//! Error types for the store boundary and the HTTP boundary.
//!
//! [`StoreError`] is what repositories return. Services translate it into
//! [`AppError`], which renders as `{"error": "..."}` with the matching status.
//! Server-side failures are logged with their full context and reach the
//! client only as `"Server error"`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::time::Duration;

/// Failures reported by a [`crate::domain::repositories::ShortUrlRepository`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The short code is already taken.
    #[error("short code already exists: {0}")]
    DuplicateKey(String),

    /// The record to update does not exist.
    #[error("record not found: {0}")]
    NotFound(String),

    /// Connection loss or any other backend fault.
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),

    /// The backend did not answer within the configured timeout.
    #[error("storage operation timed out after {0:?}")]
    Timeout(Duration),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Errors surfaced by the application services and HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The long URL failed validation.
    #[error("Invalid URL")]
    InvalidUrl,

    /// The request could not be interpreted.
    #[error("{0}")]
    BadRequest(String),

    /// No record exists for the short code.
    #[error("Short URL not found")]
    NotFound,

    /// Every generated code collided with an existing one.
    #[error("failed to generate a unique short code after {attempts} attempts")]
    CodeGenerationExhausted { attempts: usize },

    /// Unexpected server-side failure outside the store.
    #[error("internal error: {0}")]
    Internal(String),

    /// The store failed or timed out.
    #[error("storage unavailable during {operation} (key: {key}): {source}")]
    StorageUnavailable {
        operation: &'static str,
        key: String,
        #[source]
        source: StoreError,
    },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Wraps a store failure with the operation and key that triggered it.
    pub fn storage(operation: &'static str, key: impl Into<String>, source: StoreError) -> Self {
        Self::StorageUnavailable {
            operation,
            key: key.into(),
            source,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidUrl | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::CodeGenerationExhausted { .. }
            | AppError::Internal(_)
            | AppError::StorageUnavailable { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to the client.
    pub fn client_message(&self) -> String {
        if self.status_code().is_server_error() {
            "Server error".to_string()
        } else {
            self.to_string()
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = ErrorBody {
            error: self.client_message(),
        };

        (status, Json(body)).into_response()
    }
}
