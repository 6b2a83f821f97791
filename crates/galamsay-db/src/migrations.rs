//! Database migration runner.
//!
//! Embeds the SQL migration files at compile time and executes them on
//! database open. All statements use `IF NOT EXISTS` for idempotent re-running.

use crate::GalamsayDb;
use crate::error::{DatabaseError, is_statement_error};

/// Initial schema: 3 tables, 5 indexes.
const MIGRATION_001: &str = include_str!("../migrations/001_initial.sql");

impl GalamsayDb {
    /// Run all embedded migrations in sequence.
    ///
    /// A rejected statement is a `Migration` error; an engine failure such as
    /// a locked, unreadable, or non-database file is `StorageUnavailable`.
    pub(crate) async fn run_migrations(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(MIGRATION_001)
            .await
            .map_err(|e| {
                if is_statement_error(&e) {
                    DatabaseError::Migration(format!("001_initial: {e}"))
                } else {
                    e.into()
                }
            })?;
        Ok(())
    }
}
