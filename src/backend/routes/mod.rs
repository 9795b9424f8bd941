//! Routes Module
//!
//! Route table and router assembly.
//!
//! - **`router`** - builds the full router with layers and fallbacks
//! - **`api_routes`** - `/auth` and `/feed` endpoints

/// Main router creation
pub mod router;

/// API endpoint handlers
pub mod api_routes;

// Re-export commonly used functions
pub use router::create_router;
