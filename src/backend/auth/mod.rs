//! Authentication Module
//!
//! Token-based authentication and owner-only authorization.
//!
//! # Architecture
//!
//! - **`password`** - bcrypt hashing and verification
//! - **`sessions`** - signed, expiring session tokens
//! - **`policy`** - who may mutate a resource
//! - **`users`** - user model and store
//! - **`service`** - signup, login and status operations
//! - **`handlers`** - HTTP handlers for the `/auth` endpoints
//!
//! # Authentication Flow
//!
//! 1. **Signup**: email, name and password → user created
//! 2. **Login**: email and password → credentials verified → token returned
//! 3. **Later requests**: `Authorization: Bearer <token>` → the auth gate
//!    attaches an [`AuthOutcome`](crate::backend::middleware::auth::AuthOutcome)
//!
//! # Security
//!
//! - Passwords are hashed with bcrypt before storage
//! - Tokens are stateless; expiry is the only way a token stops working
//! - Invalid credentials return 401 without saying which part was wrong

/// Password hashing
pub mod password;

/// Session token issuing and verification
pub mod sessions;

/// Authorization policy
pub mod policy;

/// User data model and store
pub mod users;

/// Authentication operations
pub mod service;

/// HTTP handlers for authentication endpoints
pub mod handlers;

// Re-export commonly used types and handlers
pub use handlers::{get_status, login, signup, update_status};
pub use password::PasswordHasher;
pub use policy::{authorize, can_mutate, PolicyError};
pub use service::AuthService;
pub use sessions::{IdentityClaim, TokenService, VerifyError};
