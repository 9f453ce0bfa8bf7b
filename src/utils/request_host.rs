//! Public host extraction from HTTP requests.

use crate::AppError;
use axum::http::{HeaderMap, Uri, header};

/// Returns the host (with port, if any) the client used to reach the service.
///
/// Reads the `Host` header and falls back to the request URI authority, which
/// is where HTTP/2 clients put it. The port is kept because it is part of the
/// short URL handed back to the client.
///
/// # Errors
///
/// Returns [`AppError::BadRequest`] if:
/// - Neither a `Host` header nor a URI authority is present
/// - The header value contains invalid UTF-8 or is blank
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "example.com:8080".parse().unwrap());
///
/// let host = request_host(&headers, &Uri::from_static("/shorten")).unwrap();
/// assert_eq!(host, "example.com:8080");
/// ```
pub fn request_host(headers: &HeaderMap, uri: &Uri) -> Result<String, AppError> {
    let host = match headers.get(header::HOST) {
        Some(value) => value
            .to_str()
            .map_err(|_| AppError::bad_request("Invalid Host header"))?
            .trim()
            .to_string(),
        None => uri
            .authority()
            .map(|authority| authority.as_str().to_string())
            .ok_or_else(|| AppError::bad_request("Missing Host header"))?,
    };

    if host.is_empty() {
        return Err(AppError::bad_request("Missing Host header"));
    }

    Ok(host)
}
