/**
 * Feed Listing Handler
 *
 * `GET /feed/posts?page=N` returns one page of posts, newest first.
 */

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Json,
};

use crate::backend::error::ApiError;
use crate::backend::feed::handlers::types::{PostView, PostsQuery, PostsResponse};
use crate::backend::feed::service::FeedService;
use crate::backend::middleware::auth::AuthOutcome;

/// List posts
///
/// `page` defaults to 1; values below 1 are treated as 1.
///
/// # Errors
///
/// * `401 Unauthorized` - no valid token
/// * `422 Unprocessable Entity` - `page` is not an integer
pub async fn get_posts(
    State(feed): State<FeedService>,
    outcome: AuthOutcome,
    query: Result<Query<PostsQuery>, QueryRejection>,
) -> Result<Json<PostsResponse>, ApiError> {
    outcome.require()?;
    let Query(query) = query?;
    let page = feed.posts(&outcome, query.page).await?;

    Ok(Json(PostsResponse {
        message: "Fetched posts successfully.".to_string(),
        posts: page.posts.into_iter().map(PostView::from).collect(),
        total_items: page.total_items,
    }))
}
