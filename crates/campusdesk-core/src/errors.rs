//! Error types for calls against the college administration backend.
//!
//! Every collaborator call returns [`ApiError`] on failure. The backend reports
//! failures as a JSON body of the form `{"detail": "..."}`; that message is
//! surfaced verbatim through [`ApiError::detail`].

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response (connect, timeout, TLS).
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The session token is missing, expired or was revoked, or the login was
    /// refused. Carries the backend's `detail`.
    #[error("{0}")]
    Unauthorized(String),

    #[error("Permission denied: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Rejected input, either by the backend (400/422) or by local DTO validation.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Server error ({status}): {detail}")]
    Server { status: u16, detail: String },

    #[error("Invalid response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Operation cancelled")]
    Cancelled,
}

/// Result type for backend operations
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

/// Extracts the `detail` message from an error response body.
///
/// FastAPI-style validation errors carry a list in `detail`; in that case the
/// `msg` fields are joined. Bodies without a `detail` field are returned as-is.
pub fn extract_detail(body: &str) -> String {
    let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) else {
        return body.trim().to_string();
    };

    match parsed.detail {
        serde_json::Value::String(s) => s,
        serde_json::Value::Array(items) => items
            .iter()
            .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
            .collect::<Vec<_>>()
            .join("; "),
        other => other.to_string(),
    }
}

impl ApiError {
    /// Maps a non-success HTTP status and its body to an error.
    pub fn from_status(status: u16, body: &str) -> Self {
        let detail = extract_detail(body);
        match status {
            401 if detail.is_empty() => ApiError::Unauthorized("Authentication required".into()),
            401 => ApiError::Unauthorized(detail),
            403 => ApiError::Forbidden(detail),
            404 => ApiError::NotFound(detail),
            400 | 422 => ApiError::Validation(detail),
            _ => ApiError::Server { status, detail },
        }
    }

    /// The message shown to the user: the backend's `detail` when there is one,
    /// otherwise the error's own description.
    pub fn detail(&self) -> String {
        match self {
            ApiError::Unauthorized(d)
            | ApiError::Forbidden(d)
            | ApiError::NotFound(d)
            | ApiError::Validation(d) => d.clone(),
            ApiError::Server { detail, .. } => detail.clone(),
            other => other.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::Validation(errors.to_string())
    }
}
