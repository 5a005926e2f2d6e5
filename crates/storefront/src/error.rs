//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.
//!
//! Error responses reuse the commerce API envelope shape
//! (`{"success": false, "error": "..."}`) so front-end code has one error
//! format to turn into a toast.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::commerce::CommerceError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Commerce API operation failed.
    #[error("Commerce error: {0}")]
    Commerce(#[from] CommerceError),

    /// Session store operation failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request rejected before any network call.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON body for error responses.
#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server-side failures to Sentry; validation noise stays out
        if matches!(
            self,
            Self::Session(_) | Self::Internal(_) | Self::Commerce(CommerceError::Http(_))
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Commerce(err) => match err {
                CommerceError::NotFound(_) => StatusCode::NOT_FOUND,
                CommerceError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
                CommerceError::Api(_) => StatusCode::BAD_REQUEST,
                CommerceError::Http(_) | CommerceError::Parse(_) => StatusCode::BAD_GATEWAY,
            },
            Self::Session(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Commerce(err) => match err {
                CommerceError::Api(msg) => msg.clone(),
                CommerceError::NotFound(what) => format!("Not found: {what}"),
                CommerceError::RateLimited(secs) => {
                    format!("Too many requests, retry after {secs} seconds")
                }
                CommerceError::Http(_) | CommerceError::Parse(_) => {
                    "External service error".to_string()
                }
            },
            Self::Session(_) | Self::Internal(_) => "Internal server error".to_string(),
            Self::NotFound(what) => format!("Not found: {what}"),
            Self::Validation(msg) => msg.clone(),
        };

        (
            status,
            Json(ErrorBody {
                success: false,
                error: message,
            }),
        )
            .into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("product 123".to_string());
        assert_eq!(err.to_string(), "Not found: product 123");

        let err = AppError::Validation("customer name is required".to_string());
        assert_eq!(
            err.to_string(),
            "Validation failed: customer name is required"
        );
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Validation("test".to_string())),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(AppError::Commerce(CommerceError::RateLimited(60))),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            get_status(AppError::Commerce(CommerceError::Api(
                "insufficient stock".to_string()
            ))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Commerce(CommerceError::NotFound(
                "product 9".to_string()
            ))),
            StatusCode::NOT_FOUND
        );
    }
}
