//! # Error taxonomy for backend communication
//!
//! Four failure classes, mirroring what the views actually need to
//! distinguish: transport failures, authentication failures (401),
//! validation failures (structured field errors, flattened to one string
//! for inline display), and everything else. None of these are fatal —
//! every error degrades to a rendered message somewhere in the UI.

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Transport-level failure: DNS, connection refused, aborted fetch.
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered 401. Tagged explicitly so the client layer —
    /// not the transport — decides to clear the credential, and each view
    /// decides whether to redirect.
    #[error("authentication required")]
    AuthExpired,

    /// A 400 with a structured field-error body, flattened into a single
    /// human-readable string shown verbatim on the form.
    #[error("{0}")]
    Validation(String),

    /// Any other non-success status.
    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}

/// Map a non-success response to an [`ApiError`].
///
/// 401 always wins. A 400 whose body is a field-error object becomes
/// [`ApiError::Validation`] with the messages flattened. Everything else
/// (including 404, whose `{"detail": ...}` body is not a validation
/// failure) falls through to [`ApiError::Status`].
pub fn classify(status: u16, body: &str) -> ApiError {
    if status == 401 {
        return ApiError::AuthExpired;
    }
    if status == 400 {
        if let Ok(value) = serde_json::from_str::<Value>(body) {
            if let Some(message) = flatten_validation(&value) {
                return ApiError::Validation(message);
            }
        }
    }
    ApiError::Status {
        status,
        message: snippet(body),
    }
}

/// Flatten a backend validation body into one string.
///
/// Handles the shapes the backend actually produces:
/// `{"field": ["msg", ...]}`, `{"field": "msg"}` and `{"detail": "msg"}`.
/// Field messages are joined with spaces, in field order.
pub fn flatten_validation(body: &Value) -> Option<String> {
    let object = body.as_object()?;
    let mut messages = Vec::new();
    for value in object.values() {
        match value {
            Value::String(s) => messages.push(s.clone()),
            Value::Array(items) => {
                for item in items {
                    if let Some(s) = item.as_str() {
                        messages.push(s.to_string());
                    }
                }
            }
            _ => {}
        }
    }
    if messages.is_empty() {
        None
    } else {
        Some(messages.join(" "))
    }
}

/// First line of a body, truncated, for status-error messages.
fn snippet(body: &str) -> String {
    let line = body.lines().next().unwrap_or("").trim();
    if line.len() > 200 {
        // Back up to a char boundary; slicing mid-codepoint panics
        let mut end = 200;
        while !line.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}…", &line[..end])
    } else {
        line.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_401_is_auth_expired() {
        assert_eq!(classify(401, ""), ApiError::AuthExpired);
        // Even with a body present
        assert_eq!(
            classify(401, r#"{"detail": "Invalid token."}"#),
            ApiError::AuthExpired
        );
    }

    #[test]
    fn test_classify_400_flattens_field_errors() {
        let body = r#"{"username": ["A user with that username already exists."], "email": ["Enter a valid email address."]}"#;
        match classify(400, body) {
            ApiError::Validation(msg) => {
                assert!(msg.contains("A user with that username already exists."));
                assert!(msg.contains("Enter a valid email address."));
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_404_is_status_not_validation() {
        let err = classify(404, r#"{"detail": "Not found."}"#);
        assert!(matches!(err, ApiError::Status { status: 404, .. }));
    }

    #[test]
    fn test_classify_500_is_status() {
        let err = classify(500, "Internal Server Error");
        match err {
            ApiError::Status { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Internal Server Error");
            }
            other => panic!("expected Status, got {other:?}"),
        }
    }

    #[test]
    fn test_snippet_truncates_on_char_boundary() {
        // 300 bytes of three-byte codepoints: byte 200 falls mid-character
        let body = "€".repeat(100);
        match classify(500, &body) {
            ApiError::Status { status, message } => {
                assert_eq!(status, 500);
                assert!(message.ends_with('…'));
                assert!(message.starts_with('€'));
            }
            other => panic!("expected Status, got {other:?}"),
        }
    }

    #[test]
    fn test_snippet_keeps_short_multibyte_bodies_whole() {
        let err = classify(503, "Serveur indisponible — réessayez");
        match err {
            ApiError::Status { message, .. } => {
                assert_eq!(message, "Serveur indisponible — réessayez");
            }
            other => panic!("expected Status, got {other:?}"),
        }
    }

    #[test]
    fn test_flatten_detail_body() {
        let body = json!({"detail": "Passwords don't match"});
        assert_eq!(
            flatten_validation(&body).as_deref(),
            Some("Passwords don't match")
        );
    }

    #[test]
    fn test_flatten_ignores_non_objects() {
        assert!(flatten_validation(&json!("oops")).is_none());
        assert!(flatten_validation(&json!([1, 2])).is_none());
        assert!(flatten_validation(&json!({"count": 3})).is_none());
    }
}
