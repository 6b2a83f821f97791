//! Database error types for galamsay-db.

use galamsay_core::CoreError;
use thiserror::Error;

/// Errors from store operations.
///
/// Callers that only need to branch on the failure class should use
/// [`DatabaseError::kind`].
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// The batch already has an analysis log row.
    #[error("Batch '{0}' already has an analysis log")]
    DuplicateBatch(String),

    /// A required value is absent.
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    /// The storage engine failed: I/O, locking, or connection trouble.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[source] libsql::Error),

    /// A write broke a schema constraint. Retrying will not help.
    #[error("Constraint violated: {0}")]
    Constraint(#[source] libsql::Error),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// A stored row could not be decoded.
    #[error("Corrupt row: {0}")]
    Corrupt(String),

    /// Domain-layer failure while running the pipeline.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Coarse failure classes a caller can branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    DuplicateBatch,
    StorageUnavailable,
    Internal,
}

impl DatabaseError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::DuplicateBatch(_) => ErrorKind::DuplicateBatch,
            Self::StorageUnavailable(_) => ErrorKind::StorageUnavailable,
            Self::Constraint(_)
            | Self::Migration(_)
            | Self::Corrupt(_)
            | Self::Core(_)
            | Self::Other(_) => ErrorKind::Internal,
        }
    }
}

impl From<libsql::Error> for DatabaseError {
    fn from(error: libsql::Error) -> Self {
        if is_constraint_violation(&error) {
            Self::Constraint(error)
        } else {
            Self::StorageUnavailable(error)
        }
    }
}

/// Extended SQLite result code carried by a local libSQL failure.
fn sqlite_code(error: &libsql::Error) -> Option<i32> {
    match error {
        libsql::Error::SqliteFailure(code, _) => Some(*code),
        _ => None,
    }
}

/// Primary result code: the low byte of the extended code.
fn primary_code(error: &libsql::Error) -> Option<i32> {
    sqlite_code(error).map(|code| code & 0xff)
}

pub(crate) fn is_unique_violation(error: &libsql::Error) -> bool {
    matches!(
        sqlite_code(error),
        Some(libsql::ffi::SQLITE_CONSTRAINT_UNIQUE | libsql::ffi::SQLITE_CONSTRAINT_PRIMARYKEY)
    )
}

pub(crate) fn is_constraint_violation(error: &libsql::Error) -> bool {
    matches!(primary_code(error), Some(libsql::ffi::SQLITE_CONSTRAINT))
}

/// The statement itself was rejected (bad SQL, missing object), as opposed
/// to the engine failing to read or write the file.
pub(crate) fn is_statement_error(error: &libsql::Error) -> bool {
    matches!(primary_code(error), Some(libsql::ffi::SQLITE_ERROR))
}
