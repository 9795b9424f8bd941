//! Backend Error Module
//!
//! This module defines the error type returned by every auth and feed
//! operation and its conversion into client-facing responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - ApiError and conversions from lower layers
//! └── conversion.rs - REST (IntoResponse) and GraphQL-style formats
//! ```
//!
//! Handlers return `Result<_, ApiError>` and let axum render the error.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use conversion::{ErrorBody, GraphQlError};
pub use types::{ApiError, INVALID_CREDENTIALS};
