//! Middleware Module
//!
//! Request processing that runs before handlers.
//!
//! - **`auth`** - the authentication gate and the `AuthOutcome` extractor

pub mod auth;

pub use auth::{auth_gate, authenticate, AuthOutcome};
