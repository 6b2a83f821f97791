//! Batch identity for analysis runs.
//!
//! A batch id is a UTC timestamp with microseconds followed by 8 random hex
//! characters, e.g. `20261016_142530_123456-a3f8b2c1`. Ids sort by minting
//! time; the random suffix keeps concurrent runs from colliding without any
//! shared counter.

use chrono::{DateTime, SubsecRound, Utc};

use crate::errors::CoreError;

/// `chrono` format of the time part of a batch id.
pub const BATCH_TIME_FORMAT: &str = "%Y%m%d_%H%M%S_%6f";

/// Mints batch ids and analysis timestamps. Holds no state between calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchRecorder;

impl BatchRecorder {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Mint a fresh batch id for one analysis run.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Other` if the OS random source is unavailable.
    pub fn start_batch(&self) -> Result<String, CoreError> {
        self.start_batch_at(self.timestamp())
    }

    /// Mint a batch id whose time part is `at`, so the id and the run's
    /// analysis timestamp name the same instant.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Other` if the OS random source is unavailable.
    pub fn start_batch_at(&self, at: DateTime<Utc>) -> Result<String, CoreError> {
        let mut suffix = [0u8; 4];
        getrandom::fill(&mut suffix)
            .map_err(|e| CoreError::Other(anyhow::anyhow!("failed to generate batch suffix: {e}")))?;
        let hex: String = suffix.iter().map(|b| format!("{b:02x}")).collect();
        Ok(format!("{}-{hex}", at.format(BATCH_TIME_FORMAT)))
    }

    /// Current time truncated to microseconds, the precision the store keeps.
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        Utc::now().trunc_subsecs(6)
    }
}
