//! Service layer owning the database handle and the batch recorder.
//!
//! `GalamsayService` wraps `GalamsayDb`. Store operations are implemented as
//! `impl GalamsayService` blocks in `repos/*`, the analysis pipeline in
//! `pipeline`.

use std::time::Duration;

use galamsay_config::DatabaseConfig;
use galamsay_core::batch::BatchRecorder;

use crate::GalamsayDb;
use crate::error::DatabaseError;

/// One connection to the store plus the batch id source.
///
/// Each service owns a single connection. Concurrent callers should open
/// their own service; `SQLite` file locking serializes writers, each waiting
/// up to the configured busy timeout.
pub struct GalamsayService {
    db: GalamsayDb,
    recorder: BatchRecorder,
}

impl GalamsayService {
    /// Create a new service over a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the libSQL database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or migrated.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = GalamsayDb::open_local(db_path).await?;
        tracing::debug!(path = db_path, "opened galamsay store");
        Ok(Self::from_db(db))
    }

    /// Create a service from the `[database]` config section.
    ///
    /// # Errors
    ///
    /// Same as [`Self::new_local`].
    pub async fn open(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let busy_timeout = Duration::from_millis(config.busy_timeout_ms);
        let db = GalamsayDb::open_local_with_timeout(&config.path, busy_timeout).await?;
        tracing::debug!(
            path = %config.path,
            busy_timeout_ms = config.busy_timeout_ms,
            "opened galamsay store"
        );
        Ok(Self::from_db(db))
    }

    /// Create from an existing `GalamsayDb` (for testing).
    #[must_use]
    pub const fn from_db(db: GalamsayDb) -> Self {
        Self {
            db,
            recorder: BatchRecorder::new(),
        }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &GalamsayDb {
        &self.db
    }

    /// Access the batch recorder.
    #[must_use]
    pub const fn recorder(&self) -> &BatchRecorder {
        &self.recorder
    }
}
