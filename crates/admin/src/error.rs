//! Unified error handling for admin.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::db::RepositoryError;

/// Application-level error type for the admin panel.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Session store operation failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Every variant is a server error
        let event_id = sentry::capture_error(&self);
        tracing::error!(
            error = %self,
            sentry_event_id = %event_id,
            "Admin request error"
        );

        // Don't expose internal error details to clients
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
