//! Application configuration module
//!
//! Configuration is read once at process start, validated, and then handed to
//! the components that need it. Nothing reads the environment after startup;
//! in particular the token signing secret is passed explicitly into the token
//! service.
//!
//! # Environment
//!
//! | Variable            | Default   |
//! |---------------------|-----------|
//! | `JWT_SECRET`        | required  |
//! | `TOKEN_TTL_SECS`    | `3600`    |
//! | `BCRYPT_COST`       | `12`      |
//! | `DATABASE_URL`      | unset     |
//! | `SERVER_PORT`       | `8080`    |
//! | `IMAGES_DIR`        | `images`  |
//! | `POSTS_PER_PAGE`    | `2`       |
//! | `CORS_ALLOW_ORIGIN` | `*`       |

use std::path::PathBuf;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(60 * 60);
pub const DEFAULT_BCRYPT_COST: u32 = 12;
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_IMAGES_DIR: &str = "images";
pub const DEFAULT_POSTS_PER_PAGE: u32 = 2;

// Bounds accepted by bcrypt
const MIN_BCRYPT_COST: u32 = 4;
const MAX_BCRYPT_COST: u32 = 31;

/// Application configuration
#[derive(Debug)]
pub struct AppConfig {
    /// Shared secret used to sign and verify session tokens
    pub jwt_secret: SecretString,
    /// Lifetime of tokens issued at login
    pub token_ttl: Duration,
    /// bcrypt work factor
    pub bcrypt_cost: u32,
    /// Postgres connection string; `None` selects the in-memory store
    pub database_url: Option<String>,
    /// Port the HTTP server listens on
    pub port: u16,
    /// Directory holding post images
    pub images_dir: PathBuf,
    /// Page size for the feed listing
    pub posts_per_page: u32,
    /// Value for `Access-Control-Allow-Origin`; `None` allows any origin
    pub cors_allow_origin: Option<String>,
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();

        if let Some(secret) = lookup("JWT_SECRET") {
            builder = builder.jwt_secret(secret);
        }
        if let Some(ttl) = lookup("TOKEN_TTL_SECS") {
            builder = builder.token_ttl(Duration::from_secs(parse_var("TOKEN_TTL_SECS", &ttl)?));
        }
        if let Some(cost) = lookup("BCRYPT_COST") {
            builder = builder.bcrypt_cost(parse_var("BCRYPT_COST", &cost)?);
        }
        if let Some(url) = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()) {
            builder = builder.database_url(url);
        }
        if let Some(port) = lookup("SERVER_PORT") {
            builder = builder.port(parse_var("SERVER_PORT", &port)?);
        }
        if let Some(dir) = lookup("IMAGES_DIR") {
            builder = builder.images_dir(dir);
        }
        if let Some(per_page) = lookup("POSTS_PER_PAGE") {
            builder = builder.posts_per_page(parse_var("POSTS_PER_PAGE", &per_page)?);
        }
        if let Some(origin) = lookup("CORS_ALLOW_ORIGIN") {
            builder = builder.cors_allow_origin(origin);
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.expose_secret().is_empty() {
            return Err(ConfigError::MissingValue("JWT_SECRET"));
        }
        if self.token_ttl.is_zero() {
            return Err(ConfigError::InvalidValue {
                key: "TOKEN_TTL_SECS",
                reason: "must be greater than zero".to_string(),
            });
        }
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&self.bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                key: "BCRYPT_COST",
                reason: format!("must be between {MIN_BCRYPT_COST} and {MAX_BCRYPT_COST}"),
            });
        }
        if self.posts_per_page == 0 {
            return Err(ConfigError::InvalidValue {
                key: "POSTS_PER_PAGE",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_var<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key,
        reason: e.to_string(),
    })
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    jwt_secret: Option<SecretString>,
    token_ttl: Option<Duration>,
    bcrypt_cost: Option<u32>,
    database_url: Option<String>,
    port: Option<u16>,
    images_dir: Option<PathBuf>,
    posts_per_page: Option<u32>,
    cors_allow_origin: Option<String>,
}

impl AppConfigBuilder {
    /// Set the token signing secret
    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(SecretString::from(secret.into()));
        self
    }

    /// Set the lifetime of issued tokens
    pub fn token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = Some(ttl);
        self
    }

    /// Set the bcrypt work factor
    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = Some(cost);
        self
    }

    /// Set the database URL
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    /// Set the listening port
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the image directory
    pub fn images_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.images_dir = Some(dir.into());
        self
    }

    /// Set the feed page size
    pub fn posts_per_page(mut self, per_page: u32) -> Self {
        self.posts_per_page = Some(per_page);
        self
    }

    /// Restrict CORS to a single origin. `*` keeps the permissive default.
    pub fn cors_allow_origin(mut self, origin: impl Into<String>) -> Self {
        let origin = origin.into();
        self.cors_allow_origin = match origin.trim() {
            "" | "*" => None,
            trimmed => Some(trimmed.to_string()),
        };
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let config = AppConfig {
            jwt_secret: self.jwt_secret.ok_or(ConfigError::MissingValue("JWT_SECRET"))?,
            token_ttl: self.token_ttl.unwrap_or(DEFAULT_TOKEN_TTL),
            bcrypt_cost: self.bcrypt_cost.unwrap_or(DEFAULT_BCRYPT_COST),
            database_url: self.database_url,
            port: self.port.unwrap_or(DEFAULT_PORT),
            images_dir: self
                .images_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_IMAGES_DIR)),
            posts_per_page: self.posts_per_page.unwrap_or(DEFAULT_POSTS_PER_PAGE),
            cors_allow_origin: self.cors_allow_origin,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}
