//! Application error types and HTTP response mapping.
//!
//! Defines `LoadError` for commit log ingestion, `MalformedRowError` for a
//! single bad row, and `AppError` for request handling. `AppError` implements
//! Axum's `IntoResponse` to convert errors to JSON error bodies.
//!
//! Error mappings:
//! - `CommitNotFound` → 404
//! - `InvalidRequest` → 400
//! - `Internal` → 500

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// A required field of one log row could not be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: invalid value {value:?} in column '{column}'")]
pub struct MalformedRowError {
    /// 1-based line in the log file (the header is line 1)
    pub line: u64,
    pub column: &'static str,
    pub value: String,
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read commit log {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Commit log is missing column '{0}'")]
    MissingColumn(&'static str),

    #[error("Malformed row, {0}")]
    MalformedRow(#[from] MalformedRowError),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Commit not found: {0}")]
    CommitNotFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::CommitNotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_row_names_column_and_value() {
        let err = LoadError::from(MalformedRowError {
            line: 4,
            column: "depth",
            value: "deep".to_string(),
        });
        let message = err.to_string();
        assert!(message.contains("line 4"));
        assert!(message.contains("'depth'"));
        assert!(message.contains("\"deep\""));
    }

    #[test]
    fn app_errors_map_to_status_codes() {
        let not_found = AppError::CommitNotFound("abc".into()).into_response();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let bad = AppError::InvalidRequest("nope".into()).into_response();
        assert_eq!(bad.status(), StatusCode::BAD_REQUEST);

        let internal = AppError::Internal("Lock poisoned".into()).into_response();
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
