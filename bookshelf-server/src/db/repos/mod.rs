//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Soft-deleted rows are invisible to every read and write
//! - Unique violations surface as `DbError::DuplicateKey`
//! - Uses transactions for multi-step operations

pub mod books;

pub use books::{BookChanges, BookRepo, BookRow, NewBook};
