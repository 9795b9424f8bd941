//! Authentication Handlers Module
//!
//! HTTP handlers for the `/auth` endpoints. Each handler is a thin wrapper
//! around [`AuthService`](crate::backend::auth::service::AuthService).
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── types.rs    - Request and response types
//! ├── signup.rs   - User registration handler
//! ├── login.rs    - User authentication handler
//! └── status.rs   - Status read/update handlers
//! ```
//!
//! # Handlers
//!
//! - **`signup`** - PUT /auth/signup
//! - **`login`** - POST /auth/login
//! - **`get_status`** - GET /auth/status
//! - **`update_status`** - PATCH /auth/status

/// Request and response types
pub mod types;

/// Signup handler
pub mod signup;

/// Login handler
pub mod login;

/// Status handlers
pub mod status;

// Re-export commonly used types
pub use types::{
    LoginRequest, LoginResponse, MessageResponse, SignupRequest, SignupResponse, StatusResponse,
    UpdateStatusRequest,
};

// Re-export handlers
pub use login::login;
pub use signup::signup;
pub use status::{get_status, update_status};
