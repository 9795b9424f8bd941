//! Feed Module
//!
//! Posts, their store, the feed operations and their HTTP handlers.

/// Post model and store
pub mod posts;

/// Feed operations
pub mod service;

/// HTTP handlers for feed endpoints
pub mod handlers;

pub use handlers::{create_post, delete_post, get_post, get_posts, update_post};
pub use service::FeedService;
