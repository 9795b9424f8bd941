/**
 * Feed Handler Types
 *
 * Request bodies and JSON views for the `/feed` endpoints. Ids are sent as
 * `_id` and every other field is camelCase, so existing front ends keep
 * working unchanged.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::backend::feed::service::{Creator, PostDetails};

/// Query string of `GET /feed/posts`
///
/// Signed so that `page=0` and negative pages reach the service, which
/// reads them as page 1.
#[derive(Deserialize, Debug, Default)]
pub struct PostsQuery {
    pub page: Option<i64>,
}

/// Body of `POST /feed/post`
#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub image_url: String,
}

/// Body of `PUT /feed/post/{postId}`
///
/// Omit `imageUrl`, or send `"undefined"`, to keep the current image.
#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CreatorView {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

impl From<Creator> for CreatorView {
    fn from(creator: Creator) -> Self {
        Self {
            id: creator.id.to_string(),
            name: creator.name,
        }
    }
}

/// A post as clients see it
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub content: String,
    pub image_url: String,
    pub creator: CreatorView,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PostDetails> for PostView {
    fn from(details: PostDetails) -> Self {
        let PostDetails { post, creator } = details;
        Self {
            id: post.id.to_string(),
            title: post.title,
            content: post.content,
            image_url: post.image_url,
            creator: creator.into(),
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// Response of `GET /feed/posts`
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PostsResponse {
    pub message: String,
    pub posts: Vec<PostView>,
    pub total_items: u64,
}

/// Response of `POST /feed/post`
#[derive(Serialize, Deserialize, Debug)]
pub struct CreatePostResponse {
    pub message: String,
    pub post: PostView,
    pub creator: CreatorView,
}

/// Response of `GET` and `PUT /feed/post/{postId}`
#[derive(Serialize, Deserialize, Debug)]
pub struct PostResponse {
    pub message: String,
    pub post: PostView,
}
