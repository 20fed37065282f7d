//! Application Error Types
//!
//! Centralized error taxonomy for the visibility engine. Status-code
//! mapping is the wrapping HTTP layer's job; this crate only distinguishes
//! resolution outcomes.

use serde::Serialize;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A referenced post or comment does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Access was resolved and disallowed, with a reason-specific message.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Malformed input, e.g. a self-ban request.
    #[error("Invalid: {0}")]
    Invalid(String),

    /// Storage failures propagate unchanged; retries, if any, belong to
    /// the storage layer.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden(reason.into())
    }

    /// True for errors that should surface to the caller as-is rather
    /// than being logged as engine failures.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::NotFound(_) | AppError::Forbidden(_) | AppError::Invalid(_)
        )
    }
}

/// Error payload handed to the wrapping API layer.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

impl From<&AppError> for ErrorBody {
    fn from(err: &AppError) -> Self {
        let message = match err {
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                "Internal server error".into()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".into()
            }
            other => other.to_string(),
        };
        Self { message }
    }
}
