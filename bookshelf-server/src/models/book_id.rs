//! Book identifier - stringified integer on the API boundary

use std::fmt;

use super::ValidationError;

/// Validated book id.
///
/// Ids are assigned by the database (`BIGSERIAL`); on the API boundary they
/// travel as decimal strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BookId(i64);

impl BookId {
    /// Parse an id from its string form.
    ///
    /// Only plain ASCII digits are accepted (no sign, no whitespace).
    ///
    /// # Example
    /// ```
    /// use bookshelf_server::models::BookId;
    ///
    /// assert_eq!(BookId::parse("42").unwrap().get(), 42);
    /// assert!(BookId::parse("+42").is_err());
    /// assert!(BookId::parse("abc").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "id" });
        }

        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::InvalidFormat {
                field: "id",
                reason: "must be a non-negative integer",
            });
        }

        s.parse::<i64>()
            .map(Self)
            .map_err(|_| ValidationError::InvalidFormat {
                field: "id",
                reason: "out of range",
            })
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for BookId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
