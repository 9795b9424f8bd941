/**
 * Server Configuration
 *
 * Opens the optional Postgres connection pool. Without a configured
 * `DATABASE_URL` the server runs on the in-memory store, which keeps data
 * only for the life of the process.
 *
 * # Error Handling
 *
 * A configured database that cannot be reached is a startup error: silently
 * falling back to memory would lose every write.
 */

use sqlx::PgPool;

use crate::shared::AppConfig;

/// Database configuration result
///
/// `None` when no database is configured.
pub type DatabaseConfig = Option<PgPool>;

/// Connect to the configured database and apply migrations
///
/// # Returns
///
/// - `Ok(Some(pool))` if the database is configured and migrated
/// - `Ok(None)` if `DATABASE_URL` is not set
///
/// # Errors
///
/// Connection or migration failures.
pub async fn load_database(config: &AppConfig) -> Result<DatabaseConfig, sqlx::Error> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set. Using the in-memory store; data is lost on restart.");
        return Ok(None);
    };

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(database_url).await.map_err(|e| {
        tracing::error!("Failed to create database connection pool: {:?}", e);
        e
    })?;
    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(&pool).await.map_err(|e| {
        tracing::error!("Failed to run database migrations: {}", e);
        sqlx::Error::from(e)
    })?;
    tracing::info!("Database migrations completed successfully");

    Ok(Some(pool))
}
