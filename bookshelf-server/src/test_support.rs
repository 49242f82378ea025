//! Shared helpers for unit tests

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Pool that never connects: nothing listens on port 1.
///
/// Good for exercising paths that fail before touching the database, and
/// for checking how connection failures surface.
pub(crate) fn unreachable_pool() -> PgPool {
    PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_millis(250))
        .connect_lazy("postgres://bookshelf@127.0.0.1:1/bookshelf")
        .expect("valid database url")
}
