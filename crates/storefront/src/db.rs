//! Database access for the storefront `PostgreSQL` instance.
//!
//! The storefront owns no commerce data (the commerce API is the source of
//! truth); its database holds tower-sessions storage only. The session
//! schema is created via:
//!
//! ```bash
//! cargo run -p cordwain-cli -- migrate storefront
//! ```

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
