//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::api::ApiError;

/// Application-level error type for the back-office.
#[derive(Debug, Error)]
pub enum AppError {
    /// Commerce API operation failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Session store operation failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Operator is not authenticated or credentials were rejected.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Operator lacks the role required for this operation.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

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
        // Capture server-side failures to Sentry
        if matches!(
            self,
            Self::Session(_)
                | Self::Internal(_)
                | Self::Api(ApiError::Http(_) | ApiError::AuthenticationFailed(_))
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Api(err) => match err {
                ApiError::NotFound(_) => StatusCode::NOT_FOUND,
                ApiError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
                ApiError::Api(_) => StatusCode::BAD_REQUEST,
                ApiError::Http(_)
                | ApiError::Parse(_)
                | ApiError::AuthenticationFailed(_)
                | ApiError::Unauthorized => StatusCode::BAD_GATEWAY,
            },
            Self::Session(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Api(err) => match err {
                ApiError::Api(msg) => msg.clone(),
                ApiError::NotFound(what) => format!("Not found: {what}"),
                ApiError::RateLimited(secs) => {
                    format!("Too many requests, retry after {secs} seconds")
                }
                ApiError::Http(_)
                | ApiError::Parse(_)
                | ApiError::AuthenticationFailed(_)
                | ApiError::Unauthorized => "External service error".to_string(),
            },
            Self::Session(_) | Self::Internal(_) => "Internal server error".to_string(),
            _ => self.to_string(),
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
