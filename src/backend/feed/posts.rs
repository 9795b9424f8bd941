/**
 * Post Model and Store
 *
 * Defines the post record, the [`PostStore`] trait the feed operations
 * persist posts through, and its Postgres implementation.
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::store::StoreError;
use crate::shared::{PostId, UserId};

/// Post record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    /// Path of the post image, relative to the image root
    pub image_url: String,
    /// Owner; the only user allowed to change or delete the post
    pub creator: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data needed to create a post
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub image_url: String,
    pub creator: UserId,
}

impl Post {
    pub fn from_new(new_post: NewPost, now: DateTime<Utc>) -> Self {
        Self {
            id: PostId::new(),
            title: new_post.title,
            content: new_post.content,
            image_url: new_post.image_url,
            creator: new_post.creator,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Persistence of post records
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Total number of posts
    async fn count(&self) -> Result<u64, StoreError>;

    /// One page of posts, newest first
    async fn list_page(&self, offset: u64, limit: u64) -> Result<Vec<Post>, StoreError>;

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, StoreError>;

    async fn create(&self, new_post: NewPost) -> Result<Post, StoreError>;

    /// Persist title, content and image of an existing post
    async fn save(&self, post: &Post) -> Result<Post, StoreError>;

    /// Remove a post; returns whether it existed
    async fn delete(&self, id: &PostId) -> Result<bool, StoreError>;

    /// Number of posts whose image URL names the file `file_name`
    async fn count_by_image(&self, file_name: &str) -> Result<u64, StoreError>;
}

#[derive(Debug, sqlx::FromRow)]
struct PostRow {
    id: Uuid,
    title: String,
    content: String,
    image_url: String,
    creator_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Self {
            id: row.id.into(),
            title: row.title,
            content: row.content,
            image_url: row.image_url,
            creator: row.creator_id.into(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const POST_COLUMNS: &str = "id, title, content, image_url, creator_id, created_at, updated_at";

/// Postgres-backed post store
#[derive(Debug, Clone)]
pub struct PgPostStore {
    pool: PgPool,
}

impl PgPostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostStore for PgPostStore {
    async fn count(&self) -> Result<u64, StoreError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await?;
        Ok(u64::try_from(count).unwrap_or(0))
    }

    async fn list_page(&self, offset: u64, limit: u64) -> Result<Vec<Post>, StoreError> {
        let rows = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts ORDER BY created_at DESC, id DESC OFFSET $1 LIMIT $2"
        ))
        .bind(i64::try_from(offset).unwrap_or(i64::MAX))
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, StoreError> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Post::from))
    }

    async fn create(&self, new_post: NewPost) -> Result<Post, StoreError> {
        let post = Post::from_new(new_post, Utc::now());

        let row = sqlx::query_as::<_, PostRow>(&format!(
            r#"
            INSERT INTO posts (id, title, content, image_url, creator_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {POST_COLUMNS}
            "#
        ))
        .bind(post.id.as_uuid())
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.image_url)
        .bind(post.creator.as_uuid())
        .bind(post.created_at)
        .bind(post.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn save(&self, post: &Post) -> Result<Post, StoreError> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            r#"
            UPDATE posts
            SET title = $1, content = $2, image_url = $3, updated_at = $4
            WHERE id = $5
            RETURNING {POST_COLUMNS}
            "#
        ))
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.image_url)
        .bind(Utc::now())
        .bind(post.id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Post::from)
            .ok_or_else(|| StoreError::not_found("post", post.id))
    }

    async fn delete(&self, id: &PostId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_by_image(&self, file_name: &str) -> Result<u64, StoreError> {
        // Final path component, with backslashes read as separators
        let (count,): (i64,) = sqlx::query_as(
            r"SELECT COUNT(*) FROM posts WHERE regexp_replace(replace(image_url, '\', '/'), '^.*/', '') = $1",
        )
        .bind(file_name)
        .fetch_one(&self.pool)
        .await?;
        Ok(u64::try_from(count).unwrap_or(0))
    }
}
