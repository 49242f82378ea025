//! GraphQL object and input types
//!
//! `Book` is the boundary shape: string id, `YYYY-MM-DD` publication date and
//! RFC 3339 timestamps with second precision.

use async_graphql::{InputObject, SimpleObject, ID};
use chrono::SecondsFormat;

use crate::db::{BookChanges, BookRow, NewBook};
use crate::models::{PublishedDate, ValidationError};

/// A book record
#[derive(SimpleObject, Debug, Clone, PartialEq)]
pub struct Book {
    pub id: ID,
    pub title: String,
    pub author: String,
    pub isbn: String,
    /// Publication date, `YYYY-MM-DD`
    pub published_at: String,
    /// RFC 3339 timestamp
    pub created_at: String,
    /// RFC 3339 timestamp
    pub updated_at: String,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Self {
            id: ID(row.id.to_string()),
            title: row.title,
            author: row.author,
            isbn: row.isbn,
            published_at: PublishedDate::from(row.published_at).to_string(),
            created_at: row.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            updated_at: row.updated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

/// Input for `createBook`
#[derive(InputObject, Debug, Clone)]
pub struct CreateBookInput {
    pub title: String,
    pub author: String,
    pub isbn: String,
    /// `YYYY-MM-DD`
    pub published_at: String,
}

impl TryFrom<CreateBookInput> for NewBook {
    type Error = ValidationError;

    fn try_from(input: CreateBookInput) -> Result<Self, Self::Error> {
        Ok(Self {
            published_at: PublishedDate::parse(&input.published_at)?,
            title: input.title,
            author: input.author,
            isbn: input.isbn,
        })
    }
}

/// Input for `updateBook`. Omitted and null fields are left unchanged.
#[derive(InputObject, Debug, Clone, Default)]
pub struct UpdateBookInput {
    pub title: Option<String>,
    pub author: Option<String>,
    pub isbn: Option<String>,
    /// `YYYY-MM-DD`
    pub published_at: Option<String>,
}

impl TryFrom<UpdateBookInput> for BookChanges {
    type Error = ValidationError;

    fn try_from(input: UpdateBookInput) -> Result<Self, Self::Error> {
        let published_at = input
            .published_at
            .as_deref()
            .map(PublishedDate::parse)
            .transpose()?;

        Ok(Self {
            title: input.title,
            author: input.author,
            isbn: input.isbn,
            published_at,
        })
    }
}
