//! GraphQL resolution layer
//!
//! Resolvers translate GraphQL arguments into repository calls and rows back
//! into `Book` objects. The pool is injected as schema data at build time.

pub mod error;
pub mod mutation;
pub mod query;
pub mod types;

use async_graphql::extensions::apollo_persisted_queries::{
    ApolloPersistedQueries, LruCacheStorage,
};
use async_graphql::{EmptySubscription, Schema};
use sqlx::PgPool;

pub use error::ApiError;
pub use mutation::MutationRoot;
pub use query::QueryRoot;
pub use types::{Book, CreateBookInput, UpdateBookInput};

/// Capacity of the automatic persisted query cache
const PERSISTED_QUERY_CACHE_SIZE: usize = 100;

pub type BookSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the executable schema around a shared pool.
pub fn build_schema(pool: PgPool) -> BookSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(pool)
        .extension(ApolloPersistedQueries::new(LruCacheStorage::new(
            PERSISTED_QUERY_CACHE_SIZE,
        )))
        .finish()
}
