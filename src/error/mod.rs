//! Centralized error handling for the FXDesk client
//!
//! This module provides the client-side error taxonomy plus the best-effort
//! extraction of a human-readable message from whatever the backend puts in
//! an error body.

use serde_json::Value;
use thiserror::Error;

/// Fallback shown when an error body carries nothing we can present
pub const DEFAULT_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Client error type covering transport, auth, HTTP and local failures
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport-level failure, no response was obtained
    #[error("Network error: {0}")]
    Network(String),

    /// Authentication is no longer recoverable locally; the session has
    /// already been torn down when this is raised
    #[error("Authentication required: {0}")]
    AuthFatal(String),

    /// Non-2xx response from the backend
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Client-side validation rejected the payload before any request was sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// Response body could not be decoded into the expected shape
    #[error("Invalid response body: {0}")]
    Decode(String),

    /// Persisted client-side state could not be written
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ApiError {
    /// HTTP status carried by this error. `Some(0)` is the sentinel for "a
    /// request went out but no response was obtained"; purely local failures
    /// (validation, decode, storage) carry no status at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Network(_) => Some(0),
            ApiError::AuthFatal(_) => Some(401),
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Validation(_) | ApiError::Decode(_) | ApiError::Storage(_) => None,
        }
    }

    /// Human-readable message suitable for a notification
    pub fn message(&self) -> String {
        match self {
            ApiError::Http { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

/// Result type alias using ApiError
pub type ApiResult<T> = Result<T, ApiError>;

/// Resolve a display message from an arbitrary error body.
///
/// The backend is not consistent about its error envelope, so this walks the
/// known shapes in priority order: a bare string body, a top-level `message`,
/// a top-level `error` (string or object with `message`), the first entry of
/// an `errors` array (class-validator style, including `constraints` maps),
/// the first entry of a `details` array, and finally [`DEFAULT_ERROR_MESSAGE`].
pub fn extract_error_message(body: &Value) -> String {
    if let Value::String(s) = body {
        return s.clone();
    }

    let obj = match body.as_object() {
        Some(obj) => obj,
        None => return DEFAULT_ERROR_MESSAGE.to_string(),
    };

    if let Some(msg) = obj.get("message").and_then(Value::as_str) {
        return msg.to_string();
    }

    match obj.get("error") {
        Some(Value::String(s)) => return s.clone(),
        Some(Value::Object(inner)) => {
            if let Some(msg) = inner.get("message").and_then(Value::as_str) {
                return msg.to_string();
            }
        }
        _ => {}
    }

    if let Some(first) = obj
        .get("errors")
        .and_then(Value::as_array)
        .and_then(|a| a.first())
    {
        if let Some(msg) = first.get("message").and_then(Value::as_str) {
            return msg.to_string();
        }
        // class-validator emits one constraint per violated rule
        if let Some(constraints) = first.get("constraints").and_then(Value::as_object) {
            let joined: Vec<&str> = constraints.values().filter_map(Value::as_str).collect();
            if !joined.is_empty() {
                return joined.join(", ");
            }
        }
    }

    if let Some(first) = obj
        .get("details")
        .and_then(Value::as_array)
        .and_then(|a| a.first())
    {
        if let Some(s) = first.as_str() {
            return s.to_string();
        }
        if let Some(msg) = first.get("message").and_then(Value::as_str) {
            return msg.to_string();
        }
    }

    DEFAULT_ERROR_MESSAGE.to_string()
}
