//! Shared Module
//!
//! Types that do not depend on the HTTP server: identifiers, validation
//! rules, configuration and shared error types. Everything here compiles
//! without the `ssr` feature.

/// Record identifiers
pub mod ids;

/// Shared error types
pub mod error;

/// Field validation rules
pub mod validation;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use ids::{PostId, UserId};
pub use error::{FieldError, SharedError};
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
