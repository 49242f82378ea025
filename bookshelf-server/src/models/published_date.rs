//! Publication date - strict `YYYY-MM-DD` calendar dates

use std::fmt;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use super::ValidationError;

/// chrono format string for the boundary representation
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Four-digit year, two-digit month and day. chrono alone accepts `1965-8-1`.
static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("invalid date regex"));

/// Calendar date without a time component.
///
/// Parsing is strict so that formatting a parsed value yields the input
/// string unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PublishedDate(NaiveDate);

impl PublishedDate {
    /// Parse a `YYYY-MM-DD` string.
    ///
    /// # Example
    /// ```
    /// use bookshelf_server::models::PublishedDate;
    ///
    /// assert!(PublishedDate::parse("1965-08-01").is_ok());
    /// assert!(PublishedDate::parse("1965-8-1").is_err());      // not zero-padded
    /// assert!(PublishedDate::parse("1965-02-30").is_err());    // no such day
    /// ```
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty {
                field: "publishedAt",
            });
        }

        if !DATE_RE.is_match(s) {
            return Err(ValidationError::InvalidFormat {
                field: "publishedAt",
                reason: "expected a YYYY-MM-DD date",
            });
        }

        NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map(Self)
            .map_err(|_| ValidationError::InvalidFormat {
                field: "publishedAt",
                reason: "not a valid calendar date",
            })
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for PublishedDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for PublishedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}
