//! Shared Error Types
//!
//! This module defines error types that are independent of the HTTP layer:
//! identifier parsing failures and per-field validation failures. The backend
//! wraps them into its own error type before they reach a client.
//!
//! # Usage
//!
//! ```rust
//! use quillfeed::shared::error::{FieldError, SharedError};
//!
//! let error = SharedError::validation("title", "Title is invalid");
//! let field = FieldError::new("email", "Email is invalid");
//! ```
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single rejected input field, reported back to clients as part of a
/// validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Name of the offending input field
    pub field: String,
    /// Human-readable reason
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

/// Errors that can occur outside the server layer
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// A textual identifier did not parse
    #[error("Invalid {kind} id: {value}")]
    InvalidId {
        /// Which kind of record the id was meant to name
        kind: &'static str,
        /// The rejected input
        value: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new invalid-id error
    pub fn invalid_id(kind: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidId {
            kind,
            value: value.into(),
        }
    }
}

impl From<FieldError> for SharedError {
    fn from(err: FieldError) -> Self {
        Self::validation(err.field, err.message)
    }
}
