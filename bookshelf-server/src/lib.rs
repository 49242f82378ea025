//! bookshelf-server: GraphQL API for book records
//!
//! Layers, leaf to root:
//! - models: validated input types (dates, ids)
//! - db: PostgreSQL pool, migrations, seeding and the book repository
//! - graphql: query/mutation resolvers and schema construction
//! - http: axum router serving the schema, playground and health check

pub mod db;
pub mod graphql;
pub mod http;
pub mod models;

#[cfg(test)]
mod test_support;

pub use db::{initialize, DbError};
pub use graphql::{build_schema, BookSchema};
pub use http::{run_server, ServerConfig};
