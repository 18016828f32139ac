//! Error types for taskboard
//!
//! HTTP status mapping per the API contract:
//! - 400: Validation failure (bad title, unparsable due date)
//! - 404: Unknown task id on any per-id operation
//! - 500: Store failure (lock contention, I/O, corrupt snapshot)

use std::path::PathBuf;

use axum::http::StatusCode;
use thiserror::Error;

/// Main error type for taskboard operations
#[derive(Error, Debug)]
pub enum Error {
    // Client errors (400)
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Missing records (404)
    #[error("Task not found: {0}")]
    NotFound(u64),

    // Store failures (500)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Lock acquisition failed: {0}")]
    LockFailed(PathBuf),

    #[error("Store error: {0}")]
    Store(String),
}

impl Error {
    /// Get the HTTP status for this error
    pub fn http_status(&self) -> StatusCode {
        match self {
            Error::Validation(_) | Error::InvalidConfig(_) => StatusCode::BAD_REQUEST,

            Error::NotFound(_) => StatusCode::NOT_FOUND,

            Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::LockFailed(_)
            | Error::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Result type alias for taskboard operations
pub type Result<T> = std::result::Result<T, Error>;

/// Wire shape for error responses
#[derive(serde::Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl From<&Error> for ErrorBody {
    fn from(err: &Error) -> Self {
        ErrorBody {
            error: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_bad_request() {
        let err = Error::Validation("title cannot be empty".to_string());
        assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        let err = Error::NotFound(42);
        assert_eq!(err.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Task not found: 42");
    }

    #[test]
    fn store_failures_map_to_internal_error() {
        let err = Error::Store("snapshot unreadable".to_string());
        assert_eq!(err.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
        let err = Error::LockFailed(PathBuf::from("/tmp/tasks.json.lock"));
        assert_eq!(err.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
