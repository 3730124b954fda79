//! Shared Error Types
//!
//! This module defines error types that are shared between the API layer and
//! the page renderer. These errors represent failures that do not depend on the
//! server runtime (validation of submitted data, JSON handling).
//!
//! # Error Categories
//!
//! - `Validation` - A submitted field failed its schema constraints
//! - `Serialization` - JSON serialization/deserialization failures
//!
//! # Usage
//!
//! ```rust
//! use matchday::shared::error::SharedError;
//!
//! let error = SharedError::validation("email", "Enter a valid email address");
//! ```
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shared error types that can occur in both the API and page layers
#[derive(Debug, Error, Clone)]
pub enum SharedError {
    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    Validation {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// JSON serialization or deserialization error
    #[error("Serialization error: {message}")]
    Serialization {
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for SharedError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}

/// A single field that failed form validation
///
/// Returned in bulk by `FormSchema::validate` so the client can highlight
/// every offending control at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<FieldError> for SharedError {
    fn from(err: FieldError) -> Self {
        Self::validation(err.field, err.message)
    }
}
