//! Database error handling utilities
//!
//! Classifies Postgres constraint violations so the repository can turn them
//! into [`DbError`](super::DbError) variants the API understands.
//!
//! # Examples
//!
//! ```rust,ignore
//! match check_constraint_violation(err) {
//!     ConstraintViolation::Unique { .. } => DbError::SeatTaken(conflict),
//!     ConstraintViolation::ForeignKey { .. } => DbError::invalid_reference("Flight", id),
//!     ConstraintViolation::Other(e) => DbError::from(e),
//! }
//! ```

use sqlx::error::ErrorKind;
use sqlx::Error as SqlxError;

/// Result of checking for a database constraint violation
#[derive(Debug)]
pub enum ConstraintViolation {
    /// A unique constraint was violated
    Unique { constraint: Option<String> },
    /// A foreign key constraint was violated
    ForeignKey { constraint: Option<String> },
    /// A CHECK constraint was violated
    Check { constraint: Option<String> },
    /// No constraint violation - some other error occurred
    Other(SqlxError),
}

impl ConstraintViolation {
    /// Name of the violated constraint, when Postgres reports one
    pub fn constraint(&self) -> Option<&str> {
        match self {
            Self::Unique { constraint }
            | Self::ForeignKey { constraint }
            | Self::Check { constraint } => constraint.as_deref(),
            Self::Other(_) => None,
        }
    }
}

/// Check the type of database constraint violation
pub fn check_constraint_violation(error: SqlxError) -> ConstraintViolation {
    if let SqlxError::Database(ref db_err) = error {
        let constraint = db_err.constraint().map(str::to_string);
        match db_err.kind() {
            ErrorKind::UniqueViolation => return ConstraintViolation::Unique { constraint },
            ErrorKind::ForeignKeyViolation => {
                return ConstraintViolation::ForeignKey { constraint }
            },
            ErrorKind::CheckViolation => return ConstraintViolation::Check { constraint },
            _ => {},
        }
    }
    ConstraintViolation::Other(error)
}
