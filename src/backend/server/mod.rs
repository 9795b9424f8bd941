//! Server Module
//!
//! Configuration loading, application state, and startup.
//!
//! - **`config`** - optional Postgres pool and migrations
//! - **`state`** - `AppState` and its `FromRef` impls
//! - **`init`** - builds the router from an `AppConfig`

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use init::{build_app, create_app, InitError};
pub use state::AppState;
