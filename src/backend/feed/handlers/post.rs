/**
 * Post Handlers
 *
 * Create, read, update and delete a single post. Update and delete are
 * owner-only; the ownership check lives in the feed service.
 *
 * Malformed post ids are answered with 404, the same as unknown ones.
 */

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};

use crate::backend::auth::handlers::types::MessageResponse;
use crate::backend::error::ApiError;
use crate::backend::feed::handlers::types::{
    CreatePostRequest, CreatePostResponse, PostResponse, PostView, UpdatePostRequest,
};
use crate::backend::feed::service::{FeedService, PostInput, PostUpdate};
use crate::backend::middleware::auth::AuthOutcome;

/// Create a post owned by the caller
///
/// # Errors
///
/// * `401 Unauthorized` - no valid token
/// * `422 Unprocessable Entity` - short title or content, no image, or a
///   body that is not a post
pub async fn create_post(
    State(feed): State<FeedService>,
    outcome: AuthOutcome,
    request: Result<Json<CreatePostRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatePostResponse>), ApiError> {
    outcome.require()?;
    let Json(request) = request?;
    let details = feed
        .create_post(
            &outcome,
            PostInput {
                title: request.title,
                content: request.content,
                image_url: request.image_url,
            },
        )
        .await?;

    let post = PostView::from(details);
    let creator = post.creator.clone();
    Ok((
        StatusCode::CREATED,
        Json(CreatePostResponse {
            message: "Post created successfully!".to_string(),
            post,
            creator,
        }),
    ))
}

/// Fetch one post
pub async fn get_post(
    State(feed): State<FeedService>,
    outcome: AuthOutcome,
    Path(post_id): Path<String>,
) -> Result<Json<PostResponse>, ApiError> {
    let details = feed.post(&outcome, &post_id).await?;
    Ok(Json(PostResponse {
        message: "Post fetched.".to_string(),
        post: details.into(),
    }))
}

/// Update a post the caller owns
///
/// # Errors
///
/// * `401 Unauthorized` - no valid token
/// * `403 Forbidden` - the caller is not the creator
/// * `404 Not Found` - no such post
/// * `422 Unprocessable Entity` - short title or content
pub async fn update_post(
    State(feed): State<FeedService>,
    outcome: AuthOutcome,
    Path(post_id): Path<String>,
    request: Result<Json<UpdatePostRequest>, JsonRejection>,
) -> Result<Json<PostResponse>, ApiError> {
    outcome.require()?;
    let Json(request) = request?;
    let details = feed
        .update_post(
            &outcome,
            &post_id,
            PostUpdate {
                title: request.title,
                content: request.content,
                image_url: request.image_url,
            },
        )
        .await?;

    Ok(Json(PostResponse {
        message: "Post updated!".to_string(),
        post: details.into(),
    }))
}

/// Delete a post the caller owns
///
/// # Errors
///
/// * `401 Unauthorized` - no valid token
/// * `403 Forbidden` - the caller is not the creator
/// * `404 Not Found` - no such post
pub async fn delete_post(
    State(feed): State<FeedService>,
    outcome: AuthOutcome,
    Path(post_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    feed.delete_post(&outcome, &post_id).await?;
    Ok(Json(MessageResponse::new("Deleted post.")))
}
