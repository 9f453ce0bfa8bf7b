//! DTOs for the link shortening endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request to shorten a single URL.
///
/// `longUrl` is kept loosely typed so that a missing or non-string value is
/// reported as an invalid URL rather than a malformed body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    #[serde(default)]
    pub long_url: Option<Value>,
}

impl ShortenRequest {
    /// The URL to shorten, or an empty string if absent or not a string.
    pub fn long_url(&self) -> &str {
        self.long_url
            .as_ref()
            .and_then(Value::as_str)
            .unwrap_or_default()
    }
}

/// Response carrying the full short URL.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub short_url: String,
}
