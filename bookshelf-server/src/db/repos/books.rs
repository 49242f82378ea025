//! Book repository
//!
//! CRUD over the `books` table with soft-delete semantics:
//! - create: INSERT ... RETURNING, duplicate ISBN detected via the partial index
//! - update_partial: read-modify-write in one transaction
//! - soft_delete: stamps `deleted_at`, never removes the row

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};

use crate::db::DbError;
use crate::models::{BookId, PublishedDate};

/// Book record from database
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct BookRow {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub published_at: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Fields supplied when creating a book. Id and timestamps come from the database.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub published_at: PublishedDate,
}

/// Sparse set of field updates. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookChanges {
    pub title: Option<String>,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub published_at: Option<PublishedDate>,
}

impl BookChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.isbn.is_none()
            && self.published_at.is_none()
    }

    /// Overwrite the supplied fields on `row`.
    pub fn apply_to(self, row: &mut BookRow) {
        if let Some(title) = self.title {
            row.title = title;
        }
        if let Some(author) = self.author {
            row.author = author;
        }
        if let Some(isbn) = self.isbn {
            row.isbn = isbn;
        }
        if let Some(published_at) = self.published_at {
            row.published_at = published_at.as_naive();
        }
    }
}

fn not_found(id: BookId) -> DbError {
    DbError::NotFound {
        resource: "book",
        id: id.to_string(),
    }
}

/// Book repository
pub struct BookRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> BookRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new book.
    ///
    /// `created_at` and `updated_at` both default to `NOW()`, so a fresh row
    /// has equal timestamps.
    pub async fn create(&self, book: NewBook) -> Result<BookRow, DbError> {
        sqlx::query_as::<_, BookRow>(
            r#"
            INSERT INTO books (title, author, isbn, published_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, author, isbn, published_at, created_at, updated_at, deleted_at
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.isbn)
        .bind(book.published_at.as_naive())
        .fetch_one(self.pool)
        .await
        .map_err(|e| DbError::from_write(e, "ISBN", &book.isbn))
    }

    /// Get a live book by id.
    pub async fn find_by_id(&self, id: BookId) -> Result<BookRow, DbError> {
        sqlx::query_as::<_, BookRow>(
            r#"
            SELECT id, title, author, isbn, published_at, created_at, updated_at, deleted_at
            FROM books
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id.get())
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| not_found(id))
    }

    /// Apply `changes` to a live book and return its fresh state.
    ///
    /// Read, modify and re-read happen in one transaction. There is no row
    /// lock or version column: two concurrent updates of the same book are
    /// last-committed-wins.
    pub async fn update_partial(&self, id: BookId, changes: BookChanges) -> Result<BookRow, DbError> {
        let mut tx = self.pool.begin().await?;

        let mut row = sqlx::query_as::<_, BookRow>(
            r#"
            SELECT id, title, author, isbn, published_at, created_at, updated_at, deleted_at
            FROM books
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id.get())
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| not_found(id))?;

        if changes.is_empty() {
            return Ok(row);
        }

        changes.apply_to(&mut row);

        let result = sqlx::query(
            r#"
            UPDATE books
            SET title = $2, author = $3, isbn = $4, published_at = $5, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id.get())
        .bind(&row.title)
        .bind(&row.author)
        .bind(&row.isbn)
        .bind(row.published_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| DbError::from_write(e, "ISBN", &row.isbn))?;

        // Deleted by a concurrent request between the read and the write
        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        let fresh = sqlx::query_as::<_, BookRow>(
            r#"
            SELECT id, title, author, isbn, published_at, created_at, updated_at, deleted_at
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(fresh)
    }

    /// Mark a live book as deleted.
    ///
    /// Zero affected rows means NotFound, whether the id never existed or was
    /// already deleted.
    pub async fn soft_delete(&self, id: BookId) -> Result<(), DbError> {
        let result = sqlx::query(
            r#"
            UPDATE books
            SET deleted_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id.get())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        Ok(())
    }

    /// All live books, ordered by id.
    pub async fn list_all(&self) -> Result<Vec<BookRow>, DbError> {
        let rows = sqlx::query_as::<_, BookRow>(
            r#"
            SELECT id, title, author, isbn, published_at, created_at, updated_at, deleted_at
            FROM books
            WHERE deleted_at IS NULL
            ORDER BY id ASC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}
