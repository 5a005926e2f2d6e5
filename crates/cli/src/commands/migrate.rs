//! Database migration commands.
//!
//! The servers own no commerce tables (the commerce API does); the only
//! schema to create is tower-sessions storage, so migration delegates to the
//! session store's own migrator.
//!
//! # Environment Variables
//!
//! - `STOREFRONT_DATABASE_URL` - `PostgreSQL` connection string for the storefront
//! - `ADMIN_DATABASE_URL` - `PostgreSQL` connection string for the admin

use sqlx::PgPool;
use tower_sessions_sqlx_store::PostgresStore;

/// Errors that can occur while migrating.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

async fn migrate_sessions(
    database_url_var: &'static str,
    label: &str,
) -> Result<(), MigrationError> {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var(database_url_var).map_err(|_| MigrationError::MissingEnvVar(database_url_var))?;

    tracing::info!("Connecting to {label} database...");
    let pool = PgPool::connect(&database_url).await?;

    tracing::info!("Creating {label} session schema...");
    let store = PostgresStore::new(pool);
    store.migrate().await?;

    tracing::info!("{label} migrations complete!");
    Ok(())
}

/// Create the storefront session schema.
///
/// # Errors
///
/// Returns `MigrationError` if the database is unreachable or the schema
/// cannot be created.
pub async fn storefront() -> Result<(), MigrationError> {
    migrate_sessions("STOREFRONT_DATABASE_URL", "storefront").await
}

/// Create the admin session schema.
///
/// # Errors
///
/// Returns `MigrationError` if the database is unreachable or the schema
/// cannot be created.
pub async fn admin() -> Result<(), MigrationError> {
    migrate_sessions("ADMIN_DATABASE_URL", "admin").await
}
