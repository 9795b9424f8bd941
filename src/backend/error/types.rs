/**
 * Backend Error Types
 *
 * This module defines the error returned by every operation of the auth and
 * feed services. Lower layers have their own error enums (token, password,
 * policy, store, shared); each converts into [`ApiError`] at the operation
 * boundary, where it picks up a status code and a client-facing message.
 *
 * # Error Categories
 *
 * - `NotAuthenticated` (401) - the operation needs a signed-in caller
 * - `NotAuthorized` (403) - the caller does not own the resource
 * - `InvalidCredentials` (401) - unknown email or wrong password
 * - `Validation` (422) - one or more input fields were rejected
 * - `NotFound` (404) - the resource does not exist
 * - `Store` / `Internal` (500) - infrastructure failures
 */

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::auth::password::PasswordError;
use crate::backend::auth::policy::PolicyError;
use crate::backend::auth::sessions::TokenError;
use crate::backend::store::StoreError;
use crate::shared::{FieldError, SharedError};

/// Message returned for both unknown emails and wrong passwords
pub const INVALID_CREDENTIALS: &str = "Invalid email or password.";

/// Operation-boundary error
#[derive(Debug, Error)]
pub enum ApiError {
    /// The caller presented no valid token
    #[error("Not authenticated.")]
    NotAuthenticated,

    /// The caller is signed in but does not own the resource
    #[error("Not authorized!")]
    NotAuthorized,

    /// Login failed; which half of the credential was wrong is only logged
    #[error("{}", INVALID_CREDENTIALS)]
    InvalidCredentials,

    /// Rejected input, one entry per offending field
    #[error("Validation failed.")]
    Validation(Vec<FieldError>),

    /// The requested resource does not exist
    #[error("{message}")]
    NotFound {
        /// Human-readable error message
        message: String,
    },

    /// Persistence failure
    #[error("Store error: {0}")]
    Store(#[source] StoreError),

    /// Any other server-side failure
    #[error("Internal error: {message}")]
    Internal {
        /// Description for the logs; never sent to clients
        message: String,
    },
}

impl ApiError {
    /// Create a new not-found error
    ///
    /// # Arguments
    ///
    /// * `message` - Error message shown to the client
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a validation error for a single field
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation(vec![FieldError::new(field, message)])
    }

    /// Create a new internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `NotAuthenticated`, `InvalidCredentials` - 401 Unauthorized
    /// - `NotAuthorized` - 403 Forbidden
    /// - `NotFound` - 404 Not Found
    /// - `Validation` - 422 Unprocessable Entity
    /// - `Store`, `Internal` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotAuthenticated | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::NotAuthorized => StatusCode::FORBIDDEN,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Store(_) | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the client-facing message
    ///
    /// Server-side failures share one generic message so that driver or
    /// hashing details never reach a client.
    pub fn message(&self) -> String {
        match self {
            Self::Store(_) | Self::Internal { .. } => "An error occurred.".to_string(),
            other => other.to_string(),
        }
    }

    /// Per-field details, present only for validation failures
    pub fn data(&self) -> Option<&[FieldError]> {
        match self {
            Self::Validation(fields) => Some(fields.as_slice()),
            _ => None,
        }
    }
}

impl From<PolicyError> for ApiError {
    fn from(err: PolicyError) -> Self {
        match err {
            PolicyError::NotAuthenticated => Self::NotAuthenticated,
            PolicyError::NotAuthorized => Self::NotAuthorized,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail(_) => {
                Self::invalid_field("email", "E-Mail address already exists!")
            }
            other => Self::Store(other),
        }
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        Self::internal(err.to_string())
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        Self::internal(err.to_string())
    }
}

impl From<SharedError> for ApiError {
    fn from(err: SharedError) -> Self {
        match err {
            SharedError::ValidationError { field, message } => {
                Self::Validation(vec![FieldError { field, message }])
            }
            SharedError::InvalidId { kind, .. } => Self::not_found(format!("Could not find {}.", kind)),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        Self::invalid_field("body", rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!("Rejected query string: {}", rejection.body_text());
        Self::invalid_field("query", rejection.body_text())
    }
}
