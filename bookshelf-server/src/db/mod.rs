//! Database layer - connection pool, schema and repositories
//!
//! # Design Principles
//!
//! - One pool per process, created at startup and passed down explicitly
//! - Rely on DB constraints, handle conflicts - no check-then-insert
//! - Transactions for multi-step operations
//! - Schema setup and seeding serialize on one advisory lock, so several
//!   processes may start against the same database at once

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repos;
pub mod seed;

use sqlx::{PgConnection, PgPool};

pub use error::DbError;
pub use pool::{connect_options, create_pool, DEFAULT_MAX_CONNECTIONS};
pub use repos::*;

/// Advisory lock key guarding migrations and seeding (ASCII "bookshel")
const INIT_LOCK_KEY: i64 = 0x626f_6f6b_7368_656c;

/// Block until this transaction holds the initialization lock.
///
/// Released automatically on commit or rollback.
pub(crate) async fn lock_initialization(conn: &mut PgConnection) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(INIT_LOCK_KEY)
        .execute(conn)
        .await?;
    Ok(())
}

/// Connect, migrate and seed.
///
/// Startup-time only: callers are expected to abort on error rather than
/// retry.
pub async fn initialize(database_url: &str, max_connections: u32) -> Result<PgPool, DbError> {
    let pool = create_pool(database_url, max_connections).await?;
    tracing::info!(max_connections, "Database connection established");

    migrations::run(&pool).await?;
    seed::run(&pool).await?;

    tracing::info!("Database initialization completed");
    Ok(pool)
}
