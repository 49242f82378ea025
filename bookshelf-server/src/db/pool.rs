//! Database connection pool management
//!
//! Connections report `application_name = bookshelf`, so they can be told
//! apart in `pg_stat_activity`.

use std::str::FromStr;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

/// Default maximum connections for the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

const APPLICATION_NAME: &str = "bookshelf";

/// Parse a PostgreSQL connection string into bookshelf's connect options.
pub fn connect_options(database_url: &str) -> Result<PgConnectOptions, sqlx::Error> {
    Ok(PgConnectOptions::from_str(database_url)?.application_name(APPLICATION_NAME))
}

/// Create the process-wide pool.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool("postgres://localhost/bookshelf", DEFAULT_MAX_CONNECTIONS).await?;
/// ```
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect_with(connect_options(database_url)?)
        .await
}
