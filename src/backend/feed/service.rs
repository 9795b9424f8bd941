/**
 * Feed Operations
 *
 * Listing, reading, creating, updating and deleting posts. Every operation
 * requires an authenticated caller; update and delete additionally require
 * that the caller owns the post.
 *
 * Checks run in a fixed order so anonymous callers learn nothing about
 * which posts exist:
 *
 * 1. Authentication (401)
 * 2. Post lookup (404)
 * 3. Ownership (403)
 * 4. Input validation (422)
 */

use std::collections::HashMap;
use std::sync::Arc;

use crate::backend::auth::policy::authorize;
use crate::backend::auth::users::UserStore;
use crate::backend::error::ApiError;
use crate::backend::feed::posts::{NewPost, Post, PostStore};
use crate::backend::images::{image_file_name, ImageStorage};
use crate::backend::middleware::auth::AuthOutcome;
use crate::shared::validation::{normalize_image_url, validate_image_url, validate_post};
use crate::shared::{PostId, UserId};

/// Image value clients send when they did not pick a new file
const UNCHANGED_IMAGE: &str = "undefined";

/// Public view of a post's owner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Creator {
    pub id: UserId,
    pub name: String,
}

/// A post together with its creator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDetails {
    pub post: Post,
    pub creator: Creator,
}

/// One page of the feed
#[derive(Debug, Clone)]
pub struct PostPage {
    pub posts: Vec<PostDetails>,
    pub total_items: u64,
}

/// Input for creating a post
#[derive(Debug, Clone)]
pub struct PostInput {
    pub title: String,
    pub content: String,
    pub image_url: String,
}

/// Input for updating a post; `image_url` of `None` keeps the current image
#[derive(Debug, Clone)]
pub struct PostUpdate {
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
}

#[derive(Clone)]
pub struct FeedService {
    users: Arc<dyn UserStore>,
    posts: Arc<dyn PostStore>,
    images: ImageStorage,
    per_page: u32,
}

impl FeedService {
    pub fn new(
        users: Arc<dyn UserStore>,
        posts: Arc<dyn PostStore>,
        images: ImageStorage,
        per_page: u32,
    ) -> Self {
        Self {
            users,
            posts,
            images,
            per_page: per_page.max(1),
        }
    }

    /// List posts newest first. Pages start at 1; anything lower reads page 1.
    /// One page of posts, newest first. Pages below 1 read as page 1.
    pub async fn posts(&self, outcome: &AuthOutcome, page: Option<i64>) -> Result<PostPage, ApiError> {
        outcome.require()?;

        let page = page.unwrap_or(1).max(1);
        let limit = u64::from(self.per_page);
        let offset = u64::try_from(page - 1).unwrap_or(0).saturating_mul(limit);

        let total_items = self.posts.count().await?;
        let posts = self.posts.list_page(offset, limit).await?;

        let mut creators: HashMap<UserId, Creator> = HashMap::new();
        let mut details = Vec::with_capacity(posts.len());
        for post in posts {
            let creator = match creators.get(&post.creator) {
                Some(creator) => creator.clone(),
                None => {
                    let creator = self.creator(&post.creator).await?;
                    creators.insert(post.creator, creator.clone());
                    creator
                }
            };
            details.push(PostDetails { post, creator });
        }

        Ok(PostPage {
            posts: details,
            total_items,
        })
    }

    /// Create a post owned by the caller.
    pub async fn create_post(&self, outcome: &AuthOutcome, input: PostInput) -> Result<PostDetails, ApiError> {
        let user_id = *outcome.require()?;

        let mut errors = validate_post(&input.title, &input.content);
        errors.extend(validate_image_url(&input.image_url));
        if !errors.is_empty() {
            return Err(ApiError::Validation(errors));
        }

        let mut user = self.users.find_by_id(&user_id).await?.ok_or_else(|| {
            tracing::warn!("Token names a user that no longer exists: {}", user_id);
            ApiError::NotAuthenticated
        })?;

        let post = self
            .posts
            .create(NewPost {
                title: input.title.trim().to_string(),
                content: input.content.trim().to_string(),
                image_url: normalize_image_url(&input.image_url),
                creator: user_id,
            })
            .await?;

        user.add_post(post.id);
        let user = self.users.save(&user).await?;

        tracing::info!("Post created: {} by {}", post.id, user.id);
        Ok(PostDetails {
            post,
            creator: Creator {
                id: user.id,
                name: user.name,
            },
        })
    }

    /// Read a single post.
    pub async fn post(&self, outcome: &AuthOutcome, post_id: &str) -> Result<PostDetails, ApiError> {
        outcome.require()?;
        let post = self.load(post_id).await?;
        let creator = self.creator(&post.creator).await?;
        Ok(PostDetails { post, creator })
    }

    /// Replace title, content and optionally the image of a post the caller owns.
    pub async fn update_post(
        &self,
        outcome: &AuthOutcome,
        post_id: &str,
        update: PostUpdate,
    ) -> Result<PostDetails, ApiError> {
        outcome.require()?;
        let mut post = self.load(post_id).await?;
        self.check_owner(outcome, &post)?;

        let errors = validate_post(&update.title, &update.content);
        if !errors.is_empty() {
            return Err(ApiError::Validation(errors));
        }

        let new_image = update
            .image_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty() && *url != UNCHANGED_IMAGE)
            .map(normalize_image_url);
        let mut replaced_image = None;
        if let Some(image_url) = new_image {
            if image_url != post.image_url {
                replaced_image = Some(std::mem::replace(&mut post.image_url, image_url));
            }
        }

        post.title = update.title.trim().to_string();
        post.content = update.content.trim().to_string();
        let post = self.posts.save(&post).await?;
        if let Some(old_image) = replaced_image {
            self.release_image(&old_image).await?;
        }

        tracing::info!("Post updated: {}", post.id);
        let creator = self.creator(&post.creator).await?;
        Ok(PostDetails { post, creator })
    }

    /// Delete a post the caller owns, its image file, and the owner's
    /// reference to it.
    pub async fn delete_post(&self, outcome: &AuthOutcome, post_id: &str) -> Result<(), ApiError> {
        outcome.require()?;
        let post = self.load(post_id).await?;
        let user_id = *self.check_owner(outcome, &post)?;

        if !self.posts.delete(&post.id).await? {
            return Err(ApiError::not_found("Could not find post."));
        }
        self.release_image(&post.image_url).await?;

        if let Some(mut user) = self.users.find_by_id(&user_id).await? {
            user.remove_post(&post.id);
            self.users.save(&user).await?;
        }

        tracing::info!("Post deleted: {} by {}", post.id, user_id);
        Ok(())
    }

    async fn load(&self, post_id: &str) -> Result<Post, ApiError> {
        let id = PostId::parse(post_id)?;
        self.posts
            .find_by_id(&id)
            .await?
            .ok_or_else(|| ApiError::not_found("Could not find post."))
    }

    fn check_owner<'a>(&self, outcome: &'a AuthOutcome, post: &Post) -> Result<&'a UserId, ApiError> {
        authorize(outcome, &post.creator).map_err(|e| {
            tracing::warn!(
                "Denied mutation of post {} by {:?}: {}",
                post.id,
                outcome.user_id(),
                e
            );
            ApiError::from(e)
        })
    }

    /// Remove an image file no post refers to any more.
    ///
    /// Runs after the store write, so the post being changed is no longer
    /// counted. Files still named by another post are kept.
    async fn release_image(&self, image_url: &str) -> Result<(), ApiError> {
        let Some(file_name) = image_file_name(image_url) else {
            return Ok(());
        };
        let references = self.posts.count_by_image(&file_name).await?;
        if references > 0 {
            tracing::debug!("Keeping image {}: {} post(s) still use it", file_name, references);
            return Ok(());
        }
        self.images.clear(image_url).await;
        Ok(())
    }

    async fn creator(&self, user_id: &UserId) -> Result<Creator, ApiError> {
        let name = match self.users.find_by_id(user_id).await? {
            Some(user) => user.name,
            None => {
                tracing::warn!("Post creator {} no longer exists", user_id);
                String::new()
            }
        };
        Ok(Creator { id: *user_id, name })
    }
}
