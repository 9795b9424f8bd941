//! Persistence Module
//!
//! Users and posts live behind the [`UserStore`] and [`PostStore`] traits.
//! Two implementations exist:
//!
//! - **Postgres** (`PgUserStore`, `PgPostStore`) - used when `DATABASE_URL`
//!   is configured; the schema is embedded from `migrations/`.
//! - **In-memory** ([`memory::MemoryStore`]) - used by tests and when no
//!   database is configured.
//!
//! Stores provide no cross-request serialisation: two concurrent saves of
//! the same record are last-write-wins.
//!
//! [`UserStore`]: crate::backend::auth::users::UserStore
//! [`PostStore`]: crate::backend::feed::posts::PostStore

use thiserror::Error;

/// In-memory store implementation
pub mod memory;

/// Persistence failures
#[derive(Debug, Error)]
pub enum StoreError {
    /// Another user already holds this email address
    #[error("email already registered: {0}")]
    DuplicateEmail(String),

    /// The record to save no longer exists
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// Database driver error
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    pub fn not_found(kind: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}
