//! Data access errors

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("duplicate {field}: '{value}'")]
    DuplicateKey { field: &'static str, value: String },
}

impl DbError {
    /// Classify a failed write, turning any unique violation into
    /// [`DbError::DuplicateKey`] on `field`.
    ///
    /// The constraint name is not checked: databases created before the
    /// partial index may still carry a plain `UNIQUE (isbn)` constraint.
    pub(crate) fn from_write(err: sqlx::Error, field: &'static str, value: &str) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return Self::DuplicateKey {
                    field,
                    value: value.to_owned(),
                };
            }
        }
        Self::Sqlx(err)
    }
}
