/**
 * Server Initialization
 *
 * Builds the application from an [`AppConfig`]:
 *
 * 1. Pick the stores (Postgres when configured, otherwise in-memory)
 * 2. Build the token service, password hasher and image storage
 * 3. Assemble the auth and feed services into [`AppState`]
 * 4. Create the router
 */

use std::sync::Arc;

use axum::Router;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use thiserror::Error;

use crate::backend::auth::password::PasswordHasher;
use crate::backend::auth::service::AuthService;
use crate::backend::auth::sessions::TokenService;
use crate::backend::auth::users::{PgUserStore, UserStore};
use crate::backend::feed::posts::{PgPostStore, PostStore};
use crate::backend::feed::service::FeedService;
use crate::backend::images::ImageStorage;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_database;
use crate::backend::server::state::AppState;
use crate::backend::store::memory::MemoryStore;
use crate::shared::{AppConfig, ConfigError};

/// Startup failures
#[derive(Debug, Error)]
pub enum InitError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("database unavailable: {0}")]
    Database(#[from] sqlx::Error),
}

/// Create the application
///
/// # Errors
///
/// Invalid configuration, or a configured database that cannot be reached.
pub async fn create_app(config: &AppConfig) -> Result<Router<()>, InitError> {
    tracing::info!("Initializing Quillfeed backend server");

    let (users, posts) = match load_database(config).await? {
        Some(pool) => postgres_stores(pool),
        None => memory_stores(),
    };

    let app = build_app(config, users, posts)?;
    tracing::info!("Router configured");
    Ok(app)
}

fn postgres_stores(pool: PgPool) -> (Arc<dyn UserStore>, Arc<dyn PostStore>) {
    let users: Arc<dyn UserStore> = Arc::new(PgUserStore::new(pool.clone()));
    let posts: Arc<dyn PostStore> = Arc::new(PgPostStore::new(pool));
    (users, posts)
}

fn memory_stores() -> (Arc<dyn UserStore>, Arc<dyn PostStore>) {
    let store = Arc::new(MemoryStore::new());
    let users: Arc<dyn UserStore> = store.clone();
    let posts: Arc<dyn PostStore> = store;
    (users, posts)
}

/// Create the application over the given stores
pub fn build_app(
    config: &AppConfig,
    users: Arc<dyn UserStore>,
    posts: Arc<dyn PostStore>,
) -> Result<Router<()>, ConfigError> {
    let state = build_state(config, users, posts)?;
    Ok(create_router(state, config))
}

/// Assemble the services from configuration and stores
pub fn build_state(
    config: &AppConfig,
    users: Arc<dyn UserStore>,
    posts: Arc<dyn PostStore>,
) -> Result<AppState, ConfigError> {
    config.validate()?;

    let token_ttl = chrono::Duration::from_std(config.token_ttl).map_err(|e| ConfigError::InvalidValue {
        key: "TOKEN_TTL_SECS",
        reason: e.to_string(),
    })?;

    let tokens = Arc::new(TokenService::new(config.jwt_secret.expose_secret().as_bytes()));
    let hasher = PasswordHasher::new(config.bcrypt_cost);
    let images = ImageStorage::new(config.images_dir.clone());

    Ok(AppState {
        tokens: tokens.clone(),
        auth: AuthService::new(users.clone(), hasher, tokens, token_ttl),
        feed: FeedService::new(users, posts, images, config.posts_per_page),
    })
}
