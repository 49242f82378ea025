//! Initial book records, inserted once into an empty table

use sqlx::PgPool;

use super::{lock_initialization, DbError};

struct SeedBook {
    title: &'static str,
    author: &'static str,
    isbn: &'static str,
    /// `YYYY-MM-DD`, cast to DATE by PostgreSQL
    published_at: &'static str,
}

const SEED_BOOKS: &[SeedBook] = &[
    SeedBook {
        title: "The Go Programming Language",
        author: "Alan A. A. Donovan",
        isbn: "0134190440",
        published_at: "2015-11-05",
    },
    SeedBook {
        title: "Clean Code",
        author: "Robert C. Martin",
        isbn: "0132350882",
        published_at: "2008-08-01",
    },
    SeedBook {
        title: "Design Patterns",
        author: "Erich Gamma",
        isbn: "0201633612",
        published_at: "1994-11-10",
    },
];

/// Seed the books table if it has never held a row.
///
/// Soft-deleted rows count as history, so a table whose books were all
/// deleted is not re-seeded. All inserts share one transaction, taken under
/// the initialization lock so concurrent starters see each other's seed.
///
/// Returns the number of rows inserted.
pub async fn run(pool: &PgPool) -> Result<usize, DbError> {
    let mut tx = pool.begin().await?;
    lock_initialization(&mut tx).await?;

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM books")
        .fetch_one(&mut *tx)
        .await?;

    if count > 0 {
        tracing::info!(rows = count, "Database already contains data, skipping seed");
        return Ok(0);
    }

    for book in SEED_BOOKS {
        sqlx::query(
            r#"
            INSERT INTO books (title, author, isbn, published_at)
            VALUES ($1, $2, $3, $4::date)
            "#,
        )
        .bind(book.title)
        .bind(book.author)
        .bind(book.isbn)
        .bind(book.published_at)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    tracing::info!(rows = SEED_BOOKS.len(), "Database seeded");
    Ok(SEED_BOOKS.len())
}
