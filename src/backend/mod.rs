//! Backend Module
//!
//! Everything that runs inside the HTTP server: configuration-driven
//! startup, routing, the auth gate, the auth and feed operations and
//! their stores.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Posts and the feed operations
pub mod feed;

/// Middleware for request processing
pub mod middleware;

/// User and post persistence
pub mod store;

/// Post image files
pub mod images;

/// Re-export commonly used types
pub use error::ApiError;
pub use middleware::auth::AuthOutcome;
pub use server::{build_app, create_app};
