//! API error types - every resolver failure maps to one of these
//!
//! Errors reach clients as GraphQL errors with `extensions.code` set.
//! Database messages are logged, never returned.

use async_graphql::ErrorExtensions;

use crate::db::DbError;
use crate::models::ValidationError;

/// Resolver error with a user-facing message
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed argument (date, id)
    #[error("{0}")]
    InvalidInput(#[from] ValidationError),

    /// No live record for the given id
    #[error("{resource} not found")]
    NotFound { resource: &'static str },

    /// Unique constraint among live records
    #[error("a book with this {field} already exists")]
    DuplicateKey { field: &'static str },

    /// Any other database failure
    #[error("failed to {action}")]
    Persistence {
        action: &'static str,
        #[source]
        source: DbError,
    },
}

impl ApiError {
    /// Map a data-access error, naming the attempted `action` for the
    /// generic failure message.
    pub fn from_db(err: DbError, action: &'static str) -> Self {
        match err {
            DbError::NotFound { resource, .. } => Self::NotFound { resource },
            DbError::DuplicateKey { field, .. } => Self::DuplicateKey { field },
            source => {
                tracing::error!(action, error = %source, "Database error");
                Self::Persistence { action, source }
            }
        }
    }

    /// Machine-readable code placed in `extensions.code`
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::DuplicateKey { .. } => "DUPLICATE_KEY",
            Self::Persistence { .. } => "INTERNAL",
        }
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> async_graphql::Error {
        let code = self.code();
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| e.set("code", code))
    }
}
