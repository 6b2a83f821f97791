use galamsay_core::CoreError;
use galamsay_core::source::SourceError;
use galamsay_db::{DatabaseError, ErrorKind};

pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_NOT_FOUND: i32 = 2;
pub const EXIT_DUPLICATE_BATCH: i32 = 3;
pub const EXIT_STORAGE_UNAVAILABLE: i32 = 4;
pub const EXIT_BAD_INPUT: i32 = 5;

/// Map an error to the process exit code. The first typed error found in the
/// context chain decides.
pub fn exit_code(error: &anyhow::Error) -> i32 {
    for cause in error.chain() {
        if let Some(db) = cause.downcast_ref::<DatabaseError>() {
            return match db.kind() {
                ErrorKind::NotFound => EXIT_NOT_FOUND,
                ErrorKind::DuplicateBatch => EXIT_DUPLICATE_BATCH,
                ErrorKind::StorageUnavailable => EXIT_STORAGE_UNAVAILABLE,
                ErrorKind::Internal => EXIT_FAILURE,
            };
        }
        if cause.downcast_ref::<SourceError>().is_some() {
            return EXIT_BAD_INPUT;
        }
        if let Some(core) = cause.downcast_ref::<CoreError>() {
            return match core {
                CoreError::NotFound { .. } => EXIT_NOT_FOUND,
                CoreError::Validation(_) => EXIT_BAD_INPUT,
                CoreError::Other(_) => EXIT_FAILURE,
            };
        }
    }
    EXIT_FAILURE
}
