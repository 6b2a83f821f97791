//! Store-wide statistics.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::DatabaseError;
use crate::helpers::get_u64;
use crate::service::GalamsayService;

/// Counts across every batch in the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StoreStats {
    pub total_site_records: u64,
    pub total_invalid_records: u64,
    pub total_batches: u64,
    pub distinct_regions: u64,
    pub distinct_cities: u64,
}

impl GalamsayService {
    /// Compute store statistics in a single read.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn stats(&self) -> Result<StoreStats, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT
                    (SELECT COUNT(*) FROM galamsay_sites),
                    (SELECT COUNT(*) FROM invalid_records),
                    (SELECT COUNT(*) FROM analysis_log),
                    (SELECT COUNT(DISTINCT region) FROM galamsay_sites),
                    (SELECT COUNT(DISTINCT city) FROM galamsay_sites)",
                (),
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::Corrupt("stats query returned no row".into()))?;

        Ok(StoreStats {
            total_site_records: get_u64(&row, 0)?,
            total_invalid_records: get_u64(&row, 1)?,
            total_batches: get_u64(&row, 2)?,
            distinct_regions: get_u64(&row, 3)?,
            distinct_cities: get_u64(&row, 4)?,
        })
    }

    /// Whether any analysis log has been written.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn has_logs(&self) -> Result<bool, DatabaseError> {
        Ok(self.query_count("SELECT COUNT(*) FROM analysis_log").await? > 0)
    }
}
