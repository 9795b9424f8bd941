//! Feed Handlers Module
//!
//! HTTP handlers for the `/feed` endpoints, all backed by
//! [`FeedService`](crate::backend::feed::service::FeedService).
//!
//! - **`get_posts`** - GET /feed/posts
//! - **`create_post`** - POST /feed/post
//! - **`get_post`** - GET /feed/post/{postId}
//! - **`update_post`** - PUT /feed/post/{postId}
//! - **`delete_post`** - DELETE /feed/post/{postId}

/// Request and response types
pub mod types;

/// Listing handler
pub mod list;

/// Single-post handlers
pub mod post;

pub use list::get_posts;
pub use post::{create_post, delete_post, get_post, update_post};
