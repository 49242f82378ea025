//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod book_id;
pub mod published_date;
pub mod validation;

pub use book_id::BookId;
pub use published_date::PublishedDate;
pub use validation::ValidationError;
