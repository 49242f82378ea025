//! Mutation resolvers
//!
//! Input is validated before any database work, so a malformed date or id
//! never opens a transaction.

use async_graphql::{Context, ErrorExtensions, Object, Result, ID};
use sqlx::PgPool;

use super::error::ApiError;
use super::types::{Book, CreateBookInput, UpdateBookInput};
use crate::db::{BookChanges, BookRepo, NewBook};
use crate::models::BookId;

/// Root mutation type
#[derive(Debug, Default)]
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Create a book. Fails if a live book already has the ISBN.
    async fn create_book(&self, ctx: &Context<'_>, input: CreateBookInput) -> Result<Book> {
        let pool = ctx.data::<PgPool>()?;
        create_book(pool, input).await.map_err(|e| e.extend())
    }

    /// Change the supplied fields of a live book
    async fn update_book(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: UpdateBookInput,
    ) -> Result<Book> {
        let pool = ctx.data::<PgPool>()?;
        update_book(pool, &id, input).await.map_err(|e| e.extend())
    }

    /// Soft-delete a live book. Returns true or an error, never false.
    async fn delete_book(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        let pool = ctx.data::<PgPool>()?;
        delete_book(pool, &id).await.map_err(|e| e.extend())
    }
}

async fn create_book(pool: &PgPool, input: CreateBookInput) -> Result<Book, ApiError> {
    tracing::debug!(isbn = %input.isbn, title = %input.title, "createBook");

    let book = NewBook::try_from(input)?;
    let row = BookRepo::new(pool)
        .create(book)
        .await
        .map_err(|e| ApiError::from_db(e, "create book"))?;

    tracing::info!(book_id = row.id, isbn = %row.isbn, "Book created");
    Ok(Book::from(row))
}

async fn update_book(pool: &PgPool, id: &ID, input: UpdateBookInput) -> Result<Book, ApiError> {
    tracing::debug!(book_id = %id.as_str(), ?input, "updateBook");

    let id = BookId::parse(id.as_str())?;
    let changes = BookChanges::try_from(input)?;
    let row = BookRepo::new(pool)
        .update_partial(id, changes)
        .await
        .map_err(|e| ApiError::from_db(e, "update book"))?;

    Ok(Book::from(row))
}

async fn delete_book(pool: &PgPool, id: &ID) -> Result<bool, ApiError> {
    tracing::debug!(book_id = %id.as_str(), "deleteBook");

    let id = BookId::parse(id.as_str())?;
    BookRepo::new(pool)
        .soft_delete(id)
        .await
        .map_err(|e| ApiError::from_db(e, "delete book"))?;

    tracing::info!(book_id = %id, "Book deleted");
    Ok(true)
}
