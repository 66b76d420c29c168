//! Error types for the data access layer.

use std::error::Error;
use std::fmt::{self, Display, Formatter};

use sqlx::error::ErrorKind;

/// Result alias for data layer operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors raised by the data access layer.
#[derive(Debug)]
pub enum DataError {
    /// Migration execution failed.
    MigrationFailed {
        /// Underlying migration error.
        source: sqlx::migrate::MigrateError,
    },
    /// A database operation failed.
    QueryFailed {
        /// Operation identifier.
        operation: &'static str,
        /// Underlying SQL error.
        source: sqlx::Error,
    },
}

impl DataError {
    pub(crate) fn query(operation: &'static str) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| Self::QueryFailed { operation, source }
    }

    /// Operation label recorded when the failure happened.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::MigrationFailed { .. } => "migrate",
            Self::QueryFailed { operation, .. } => *operation,
        }
    }

    /// Name of the unique constraint that rejected the write, if that is what happened.
    #[must_use]
    pub fn unique_violation(&self) -> Option<String> {
        self.violation(ErrorKind::UniqueViolation)
    }

    /// Name of the foreign key that rejected the write, if that is what happened.
    #[must_use]
    pub fn foreign_key_violation(&self) -> Option<String> {
        self.violation(ErrorKind::ForeignKeyViolation)
    }

    fn violation(&self, wanted: ErrorKind) -> Option<String> {
        let Self::QueryFailed {
            source: sqlx::Error::Database(db_err),
            ..
        } = self
        else {
            return None;
        };
        if db_err.kind() != wanted {
            return None;
        }
        Some(db_err.constraint().unwrap_or_default().to_string())
    }
}

impl Display for DataError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::MigrationFailed { .. } => formatter.write_str("migration failed"),
            Self::QueryFailed { .. } => formatter.write_str("database operation failed"),
        }
    }
}

impl Error for DataError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MigrationFailed { source } => Some(source),
            Self::QueryFailed { source, .. } => Some(source),
        }
    }
}
