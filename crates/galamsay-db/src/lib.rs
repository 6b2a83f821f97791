//! # galamsay-db
//!
//! libSQL store for galamsay analysis runs.
//!
//! Holds three append-only tables (`galamsay_sites`, `invalid_records`,
//! `analysis_log`) keyed by batch id, and the pipeline that validates raw
//! rows, aggregates them, and writes one batch atomically.
//!
//! All store and pipeline methods live on [`service::GalamsayService`] via
//! `impl GalamsayService` blocks in the `repos` and `pipeline` modules.

pub mod error;
pub mod helpers;
mod migrations;
pub mod pipeline;
pub mod repos;
pub mod service;

#[cfg(test)]
mod test_support;

pub use error::{DatabaseError, ErrorKind};
pub use pipeline::AnalysisRun;
pub use repos::invalid::InvalidFilter;
pub use repos::sites::SiteFilter;
pub use repos::stats::StoreStats;
pub use service::GalamsayService;

use std::time::Duration;

use libsql::{Builder, TransactionBehavior};

/// Lock wait used when no `[database]` config is supplied.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database handle wrapping a libSQL database and its single connection.
pub struct GalamsayDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl GalamsayDb {
    /// Open a local database at the given path, or `":memory:"`.
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::StorageUnavailable` if the database cannot be
    /// opened or read and `DatabaseError::Migration` if a schema statement is
    /// rejected.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        Self::open_local_with_timeout(path, DEFAULT_BUSY_TIMEOUT).await
    }

    /// Like [`Self::open_local`], waiting up to `busy_timeout` for locks held
    /// by other connections before a write fails.
    ///
    /// # Errors
    ///
    /// Same as [`Self::open_local`].
    pub async fn open_local_with_timeout(
        path: &str,
        busy_timeout: Duration,
    ) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;
        conn.busy_timeout(busy_timeout)?;

        let galamsay_db = Self { db, conn };
        galamsay_db.run_migrations().await?;
        Ok(galamsay_db)
    }

    /// Begin a write transaction that takes the write lock up front, so
    /// concurrent writers queue on the busy timeout instead of deadlocking
    /// on a lock upgrade.
    pub(crate) async fn begin_write(&self) -> Result<libsql::Transaction, DatabaseError> {
        Ok(self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .await?)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }
}
