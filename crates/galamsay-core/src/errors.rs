//! Cross-cutting error types for the galamsay workspace.
//!
//! Storage errors (`DatabaseError`) live in `galamsay-db` and CSV loading
//! errors (`SourceError`) in [`crate::source`]. The binary converges all of
//! them through `anyhow`.

use thiserror::Error;

/// Errors that can be raised by core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Caller-supplied data failed validation (e.g. an unknown region filter).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
