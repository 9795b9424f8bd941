/**
 * User Model and Credential Store
 *
 * This module defines the user record and the [`UserStore`] trait the
 * authentication and feed operations persist users through, together with
 * the Postgres implementation.
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::store::StoreError;
use crate::shared::{PostId, UserId};

/// Status given to every newly created user
pub const DEFAULT_STATUS: &str = "I am new!";

/// User record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    /// Unique user ID
    pub id: UserId,
    /// User email address (unique, stored normalised)
    pub email: String,
    /// Display name
    pub name: String,
    /// Hashed password (bcrypt)
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Free-text status line
    pub status: String,
    /// Posts created by this user, oldest first
    pub posts: Vec<PostId>,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp
    pub updated_at: DateTime<Utc>,
}

/// Data needed to create a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password_hash: String,
}

impl User {
    /// Build a fresh record with a new id and the default status.
    pub fn from_new(new_user: NewUser, now: DateTime<Utc>) -> Self {
        Self {
            id: UserId::new(),
            email: new_user.email,
            name: new_user.name,
            password_hash: new_user.password_hash,
            status: DEFAULT_STATUS.to_string(),
            posts: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Record ownership of a post, keeping the list free of duplicates.
    pub fn add_post(&mut self, post_id: PostId) {
        if !self.posts.contains(&post_id) {
            self.posts.push(post_id);
        }
    }

    /// Forget a post reference.
    pub fn remove_post(&mut self, post_id: &PostId) {
        self.posts.retain(|id| id != post_id);
    }
}

/// Persistence of user records
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up a user by (normalised) email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Look up a user by id
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, StoreError>;

    /// Insert a new user; fails with `DuplicateEmail` if the email is taken
    async fn create(&self, new_user: NewUser) -> Result<User, StoreError>;

    /// Persist every mutable field of an existing user
    async fn save(&self, user: &User) -> Result<User, StoreError>;
}

/// Row shape of the `users` table
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    name: String,
    password_hash: String,
    status: String,
    posts: Vec<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id.into(),
            email: row.email,
            name: row.name,
            password_hash: row.password_hash,
            status: row.status,
            posts: row.posts.into_iter().map(PostId::from).collect(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const USER_COLUMNS: &str = "id, email, name, password_hash, status, posts, created_at, updated_at";

/// Postgres-backed user store
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
        let user = User::from_new(new_user, Utc::now());
        let posts: Vec<Uuid> = Vec::new();

        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (id, email, name, password_hash, status, posts, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.id.as_uuid())
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.password_hash)
        .bind(&user.status)
        .bind(&posts)
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                StoreError::DuplicateEmail(user.email.clone())
            }
            _ => StoreError::Database(e),
        })?;

        Ok(row.into())
    }

    async fn save(&self, user: &User) -> Result<User, StoreError> {
        let posts: Vec<Uuid> = user.posts.iter().map(|id| *id.as_uuid()).collect();

        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            UPDATE users
            SET email = $1, name = $2, password_hash = $3, status = $4, posts = $5, updated_at = $6
            WHERE id = $7
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.password_hash)
        .bind(&user.status)
        .bind(&posts)
        .bind(Utc::now())
        .bind(user.id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::from)
            .ok_or_else(|| StoreError::not_found("user", user.id))
    }
}
