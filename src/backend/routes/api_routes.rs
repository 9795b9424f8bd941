/**
 * API Route Handlers
 *
 * # Routes
 *
 * ## Authentication
 * - `PUT /auth/signup` - User registration
 * - `POST /auth/login` - User login
 * - `GET /auth/status` - Current user's status
 * - `PATCH /auth/status` - Update current user's status
 *
 * ## Feed
 * - `GET /feed/posts` - Paged post listing
 * - `POST /feed/post` - Create a post
 * - `GET /feed/post/{postId}` - Fetch a post
 * - `PUT /feed/post/{postId}` - Update a post (owner only)
 * - `DELETE /feed/post/{postId}` - Delete a post (owner only)
 *
 * Authentication requirements are enforced by the operations, not here:
 * every route sits behind the auth gate, which never rejects.
 */

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::backend::auth::{get_status, login, signup, update_status};
use crate::backend::feed::{create_post, delete_post, get_post, get_posts, update_post};
use crate::backend::server::state::AppState;

pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        // Authentication endpoints
        .route("/auth/signup", put(signup))
        .route("/auth/login", post(login))
        .route("/auth/status", get(get_status).patch(update_status))
        // Feed endpoints
        .route("/feed/posts", get(get_posts))
        .route("/feed/post", post(create_post))
        .route(
            "/feed/post/{post_id}",
            get(get_post).put(update_post).delete(delete_post),
        )
}
