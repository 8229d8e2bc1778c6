//! Unified API error type with Axum `IntoResponse` support.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use ec_accounting::AccountingError;
use ec_intake::IntakeError;
use serde_json::json;

/// API error type that converts to proper HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    /// Rejected input, reported against a dot-separated field path.
    #[error("invalid `{field}`: {message}")]
    Validation { field: String, message: String },
}

impl From<AccountingError> for ApiError {
    fn from(err: AccountingError) -> Self {
        let message = match &err {
            AccountingError::Validation { message, .. }
            | AccountingError::ArithmeticGuard { message, .. } => message.clone(),
        };
        ApiError::Validation {
            field: err.field().to_string(),
            message,
        }
    }
}

impl From<IntakeError> for ApiError {
    fn from(err: IntakeError) -> Self {
        match err {
            IntakeError::Validation(e) => e.into(),
            other => ApiError::BadRequest(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                json!({ "error": msg, "status": 404 }),
            ),
            ApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": msg, "status": 400 }),
            ),
            ApiError::Validation { field, message } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "error": message, "status": 422, "field": field }),
            ),
        };

        (status, axum::Json(body)).into_response()
    }
}

/// Convenience alias.
pub type ApiResult<T> = Result<T, ApiError>;
