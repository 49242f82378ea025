//! Schema migrations for the books table
//!
//! Every statement is idempotent, so this runs on every startup. The whole
//! run is one transaction under the initialization lock.

use sqlx::{PgConnection, PgPool};

use super::{lock_initialization, DbError};

/// Partial unique index: ISBNs are unique among live (non-deleted) rows only.
pub(crate) const ISBN_LIVE_INDEX: &str = "idx_books_isbn_live";

/// Columns added after the initial table definition. Applied with
/// `ADD COLUMN IF NOT EXISTS` so older tables catch up with the model.
const LATE_COLUMNS: &[(&str, &str)] = &[
    ("created_at", "TIMESTAMPTZ NOT NULL DEFAULT NOW()"),
    ("updated_at", "TIMESTAMPTZ NOT NULL DEFAULT NOW()"),
    ("deleted_at", "TIMESTAMPTZ"),
];

/// Run all book migrations
pub async fn run(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running book migrations...");

    let mut tx = pool.begin().await?;
    lock_initialization(&mut tx).await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS books (
            id BIGSERIAL PRIMARY KEY,
            title TEXT NOT NULL,
            author TEXT NOT NULL,
            isbn TEXT NOT NULL,
            published_at DATE NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            deleted_at TIMESTAMPTZ
        )
        "#,
    )
    .execute(&mut *tx)
    .await?;

    for (column, definition) in LATE_COLUMNS {
        sqlx::query(&format!(
            "ALTER TABLE books ADD COLUMN IF NOT EXISTS {column} {definition}"
        ))
        .execute(&mut *tx)
        .await?;
    }

    create_indexes(&mut tx).await?;
    tx.commit().await?;

    tracing::info!("Book migrations complete");
    Ok(())
}

async fn create_indexes(conn: &mut PgConnection) -> Result<(), DbError> {
    sqlx::query(&format!(
        "CREATE UNIQUE INDEX IF NOT EXISTS {ISBN_LIVE_INDEX} ON books(isbn) WHERE deleted_at IS NULL"
    ))
    .execute(&mut *conn)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_books_deleted_at ON books(deleted_at)")
        .execute(&mut *conn)
        .await?;

    Ok(())
}
