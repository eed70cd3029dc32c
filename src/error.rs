//! Error types for scene generation.

use std::time::Duration;

/// Errors that can occur while generating a scene image.
#[derive(Debug, thiserror::Error)]
pub enum BookSceneError {
    /// Credentials missing or invalid (key file absent, gcloud auth failed).
    #[error("authentication failed: {0}")]
    Auth(String),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Rate limit exceeded.
    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Option<Duration> },

    /// Prompt or image was blocked by responsible-AI filters.
    #[error("content blocked: {0}")]
    ContentBlocked(String),

    /// Invalid request parameters.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Network or HTTP error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Failed to decode base64 image data.
    #[error("failed to decode: {0}")]
    Decode(String),

    /// I/O error (e.g., saving an image).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The service replied with a shape we cannot use.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

/// Result type alias for scene generation operations.
pub type Result<T> = std::result::Result<T, BookSceneError>;

/// Parses a `Retry-After` header value in seconds, if present.
pub(crate) fn parse_retry_after(headers: &reqwest::header::HeaderMap) -> Option<u64> {
    headers
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}

/// Reduces an error body to something fit for a log line or terminal.
///
/// Google error bodies are JSON with a nested `error.message`; anything else
/// is truncated so a full HTML error page never lands in the output.
pub(crate) fn sanitize_error_message(body: &str) -> String {
    const MAX_LEN: usize = 500;

    #[derive(serde::Deserialize)]
    struct ErrorBody {
        error: ErrorDetail,
    }
    #[derive(serde::Deserialize)]
    struct ErrorDetail {
        message: String,
    }

    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        return parsed.error.message;
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "(empty error body)".into();
    }
    match trimmed.char_indices().nth(MAX_LEN) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BookSceneError::Api {
            status: 404,
            message: "Not found".into(),
        };
        assert_eq!(err.to_string(), "API error: 404 - Not found");

        let err = BookSceneError::ContentBlocked("RAI filter triggered".into());
        assert_eq!(err.to_string(), "content blocked: RAI filter triggered");

        let err = BookSceneError::Auth("key file not found".into());
        assert_eq!(err.to_string(), "authentication failed: key file not found");
    }

    #[test]
    fn test_parse_retry_after() {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(reqwest::header::RETRY_AFTER, "30".parse().unwrap());
        assert_eq!(parse_retry_after(&headers), Some(30));

        let empty = reqwest::header::HeaderMap::new();
        assert_eq!(parse_retry_after(&empty), None);

        let mut bad = reqwest::header::HeaderMap::new();
        bad.insert(reqwest::header::RETRY_AFTER, "soon".parse().unwrap());
        assert_eq!(parse_retry_after(&bad), None);
    }

    #[test]
    fn test_sanitize_extracts_google_error_message() {
        let body = r#"{"error":{"code":403,"message":"Permission denied on project","status":"PERMISSION_DENIED"}}"#;
        assert_eq!(sanitize_error_message(body), "Permission denied on project");
    }

    #[test]
    fn test_sanitize_truncates_long_bodies() {
        let body = "x".repeat(2000);
        let out = sanitize_error_message(&body);
        assert!(out.len() < 600);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn test_sanitize_empty_body() {
        assert_eq!(sanitize_error_message("  "), "(empty error body)");
    }
}
