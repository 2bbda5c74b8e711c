// src/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

const GENERIC_STORAGE_MESSAGE: &str = "Internal Server Error";

/// Global Application Error Enum.
/// Centralizes error handling and mapping to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    // 500 Internal Server Error
    InternalServerError(String),

    // 400 Bad Request (payload failed validation)
    BadRequest(String),

    // 404 Not Found
    NotFound(String),

    // 500, raised by the store. `message` is what the client sees,
    // `cause` only reaches the log.
    Storage { message: &'static str, cause: String },
}

impl AppError {
    /// Wraps a store failure with the generic public message.
    pub fn storage(cause: impl Into<String>) -> Self {
        AppError::Storage {
            message: GENERIC_STORAGE_MESSAGE,
            cause: cause.into(),
        }
    }

    /// Replaces the public message of a storage failure. Other variants pass through.
    pub fn context(self, message: &'static str) -> Self {
        match self {
            AppError::Storage { cause, .. } => AppError::Storage { message, cause },
            other => other,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InternalServerError(msg) => write!(f, "internal error: {}", msg),
            AppError::BadRequest(msg) => write!(f, "bad request: {}", msg),
            AppError::NotFound(msg) => write!(f, "not found: {}", msg),
            AppError::Storage { message, cause } => write!(f, "{}: {}", message, cause),
        }
    }
}

impl std::error::Error for AppError {}

/// Implements `IntoResponse` for `AppError`.
/// Converts the error into a JSON response with appropriate HTTP status code.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            AppError::Storage { message, cause } => {
                tracing::error!("Storage failure ({}): {}", message, cause);
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };
        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Converts `sqlx::Error` into `AppError::Storage`.
/// Allows using `?` operator on database queries.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::storage(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_only_rewrites_storage_failures() {
        let err = AppError::storage("connection reset").context("Failed to submit test");
        match err {
            AppError::Storage { message, cause } => {
                assert_eq!(message, "Failed to submit test");
                assert_eq!(cause, "connection reset");
            }
            other => panic!("unexpected variant: {:?}", other),
        }

        let err = AppError::NotFound("Test not found".to_string()).context("Failed to submit test");
        assert!(matches!(err, AppError::NotFound(msg) if msg == "Test not found"));
    }

    #[test]
    fn storage_failure_maps_to_500() {
        let response = AppError::storage("boom").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = AppError::NotFound("Test not found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
