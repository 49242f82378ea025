//! Query resolvers

use async_graphql::{Context, ErrorExtensions, Object, Result, ID};
use sqlx::PgPool;

use super::error::ApiError;
use super::types::Book;
use crate::db::BookRepo;
use crate::models::BookId;

/// Root query type
#[derive(Debug, Default)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// All live books, ordered by id
    async fn books(&self, ctx: &Context<'_>) -> Result<Vec<Book>> {
        let pool = ctx.data::<PgPool>()?;
        list_books(pool).await.map_err(|e| e.extend())
    }

    /// A single live book
    async fn book(&self, ctx: &Context<'_>, id: ID) -> Result<Book> {
        let pool = ctx.data::<PgPool>()?;
        get_book(pool, &id).await.map_err(|e| e.extend())
    }
}

async fn list_books(pool: &PgPool) -> Result<Vec<Book>, ApiError> {
    tracing::debug!("books query");

    let rows = BookRepo::new(pool)
        .list_all()
        .await
        .map_err(|e| ApiError::from_db(e, "fetch books"))?;

    Ok(rows.into_iter().map(Book::from).collect())
}

async fn get_book(pool: &PgPool, id: &ID) -> Result<Book, ApiError> {
    tracing::debug!(book_id = %id.as_str(), "book query");

    let id = BookId::parse(id.as_str())?;
    let row = BookRepo::new(pool)
        .find_by_id(id)
        .await
        .map_err(|e| ApiError::from_db(e, "fetch book"))?;

    Ok(Book::from(row))
}
