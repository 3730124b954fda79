/**
 * Backend Error Types
 *
 * This module defines the error type returned by every API handler.
 * Each variant knows its HTTP status code and the message that is safe
 * to show to the client.
 *
 * # Error Categories
 *
 * ## Handler Errors
 *
 * Raised explicitly by handlers with a chosen status: bad credentials,
 * missing permissions, unknown records, duplicate sign-ups.
 *
 * ## Validation Errors
 *
 * Raised when a request body fails its form schema. Carries every failing
 * field so the client can highlight them together.
 *
 * ## Infrastructure Errors
 *
 * Database, hashing, token and email failures. Their details are logged
 * but never returned to the client.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::shared::{FieldError, SharedError};

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use matchday::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::handler(StatusCode::BAD_REQUEST, "Invalid request");
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error with an explicit status code
    #[error("Handler error: {message}")]
    HandlerError {
        status: StatusCode,
        message: String,
    },

    /// One or more request fields failed validation
    #[error("Validation failed for {} field(s)", fields.len())]
    ValidationError { fields: Vec<FieldError> },

    /// `DATABASE_URL` is not configured or the pool could not be created
    #[error("Database not configured")]
    DatabaseUnavailable,

    /// Query failure reported by sqlx
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    /// JWT encoding or decoding failure
    #[error("Token error: {0}")]
    TokenError(#[from] jsonwebtoken::errors::Error),

    /// bcrypt hashing or verification failure
    #[error("Password hashing error: {0}")]
    PasswordError(#[from] bcrypt::BcryptError),

    /// Outgoing email could not be built or delivered
    #[error("Email error: {message}")]
    EmailError { message: String },

    /// Shared error (from shared module)
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::NOT_FOUND, message)
    }

    pub fn email(message: impl Into<String>) -> Self {
        Self::EmailError {
            message: message.into(),
        }
    }

    pub fn validation(fields: Vec<FieldError>) -> Self {
        Self::ValidationError { fields }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - Uses the status code from the error
    /// - `ValidationError` - 400 Bad Request
    /// - `DatabaseUnavailable` - 503 Service Unavailable
    /// - `DatabaseError` - 404 for missing rows, 400 for unique/foreign-key
    ///   violations, 500 otherwise
    /// - `TokenError` - 401 Unauthorized
    /// - `SharedError` - 400 for validation, 500 for serialization
    /// - everything else - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::ValidationError { .. } => StatusCode::BAD_REQUEST,
            Self::DatabaseUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::DatabaseError(err) => match err {
                sqlx::Error::RowNotFound => StatusCode::NOT_FOUND,
                sqlx::Error::Database(db_err)
                    if db_err.is_unique_violation() || db_err.is_foreign_key_violation() =>
                {
                    StatusCode::BAD_REQUEST
                }
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::TokenError(_) => StatusCode::UNAUTHORIZED,
            Self::SharedError(err) => match err {
                SharedError::Validation { .. } => StatusCode::BAD_REQUEST,
                SharedError::Serialization { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::PasswordError(_) | Self::EmailError { .. } | Self::SerializationError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the message that is safe to return to the client
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::ValidationError { fields } => fields
                .first()
                .map(|f| f.message.clone())
                .unwrap_or_else(|| "Invalid request".to_string()),
            Self::DatabaseUnavailable => "Database not configured".to_string(),
            Self::DatabaseError(err) => match err {
                sqlx::Error::RowNotFound => "Not found".to_string(),
                sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                    "A record with these details already exists".to_string()
                }
                sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                    "Referenced record does not exist".to_string()
                }
                _ => "Internal server error".to_string(),
            },
            Self::TokenError(_) => "Invalid or expired session".to_string(),
            Self::SharedError(SharedError::Validation { message, .. }) => message.clone(),
            Self::SharedError(SharedError::Serialization { .. })
            | Self::PasswordError(_)
            | Self::EmailError { .. }
            | Self::SerializationError(_) => "Internal server error".to_string(),
        }
    }

    /// Field-level details, when the error carries any
    pub fn fields(&self) -> Option<Vec<FieldError>> {
        match self {
            Self::ValidationError { fields } => Some(fields.clone()),
            Self::SharedError(SharedError::Validation { field, message }) => {
                Some(vec![FieldError::new(field.clone(), message.clone())])
            }
            _ => None,
        }
    }
}
