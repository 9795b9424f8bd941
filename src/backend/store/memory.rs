/**
 * In-memory Store
 *
 * A single [`MemoryStore`] implements both [`UserStore`] and [`PostStore`]
 * over `tokio::sync::RwLock`-guarded collections. Posts are kept in
 * insertion order, which is also creation order, so a page is read by
 * walking the list from the back.
 */

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::backend::auth::users::{NewUser, User, UserStore};
use crate::backend::feed::posts::{NewPost, Post, PostStore};
use crate::backend::images::image_file_name;
use crate::backend::store::StoreError;
use crate::shared::{PostId, UserId};

#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<UserId, User>>,
    posts: RwLock<Vec<Post>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == new_user.email) {
            return Err(StoreError::DuplicateEmail(new_user.email));
        }
        let user = User::from_new(new_user, Utc::now());
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn save(&self, user: &User) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        let stored = users
            .get_mut(&user.id)
            .ok_or_else(|| StoreError::not_found("user", user.id))?;
        *stored = User {
            updated_at: Utc::now(),
            ..user.clone()
        };
        Ok(stored.clone())
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.posts.read().await.len() as u64)
    }

    async fn list_page(&self, offset: u64, limit: u64) -> Result<Vec<Post>, StoreError> {
        let posts = self.posts.read().await;
        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(posts.iter().rev().skip(offset).take(limit).cloned().collect())
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, StoreError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| &p.id == id).cloned())
    }

    async fn create(&self, new_post: NewPost) -> Result<Post, StoreError> {
        let post = Post::from_new(new_post, Utc::now());
        self.posts.write().await.push(post.clone());
        Ok(post)
    }

    async fn save(&self, post: &Post) -> Result<Post, StoreError> {
        let mut posts = self.posts.write().await;
        let stored = posts
            .iter_mut()
            .find(|p| p.id == post.id)
            .ok_or_else(|| StoreError::not_found("post", post.id))?;
        stored.title = post.title.clone();
        stored.content = post.content.clone();
        stored.image_url = post.image_url.clone();
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete(&self, id: &PostId) -> Result<bool, StoreError> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|p| &p.id != id);
        Ok(posts.len() != before)
    }

    async fn count_by_image(&self, file_name: &str) -> Result<u64, StoreError> {
        let posts = self.posts.read().await;
        let count = posts
            .iter()
            .filter(|p| image_file_name(&p.image_url).as_deref() == Some(file_name))
            .count();
        Ok(count as u64)
    }
}
