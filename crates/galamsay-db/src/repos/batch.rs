//! Atomic batch writes: sites, log, and invalid rows in one transaction.

use galamsay_core::CoreError;
use galamsay_core::entities::{AnalysisLog, InvalidRecord, SiteRecord};

use crate::error::DatabaseError;
use crate::repos::invalid::insert_invalid;
use crate::repos::logs::insert_log;
use crate::repos::sites::insert_sites;
use crate::service::GalamsayService;

impl GalamsayService {
    /// Persist a whole batch. Either every row becomes visible or none does.
    ///
    /// Every site and invalid record must carry `log.batch_id`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::DuplicateBatch` if the batch already has a log
    /// (nothing is written), `DatabaseError::Core` if a record belongs to a
    /// different batch, `DatabaseError::Constraint` if a row breaks the
    /// schema, and `DatabaseError::StorageUnavailable` if the engine fails.
    /// Every failure after the transaction opens rolls it back.
    pub async fn save_batch(
        &self,
        log: &AnalysisLog,
        sites: &[SiteRecord],
        invalid: &[InvalidRecord],
    ) -> Result<(), DatabaseError> {
        let batch_id = log.batch_id.as_str();
        let stray = sites
            .iter()
            .map(|s| s.batch_id.as_str())
            .chain(invalid.iter().map(|r| r.batch_id.as_str()))
            .find(|other| *other != batch_id);
        if let Some(other) = stray {
            return Err(CoreError::Validation(format!(
                "record tagged with batch '{other}' cannot be saved under '{batch_id}'"
            ))
            .into());
        }

        let tx = self.db().begin_write().await?;
        let written = async {
            insert_log(&tx, log).await?;
            insert_sites(&tx, sites).await?;
            insert_invalid(&tx, invalid).await
        }
        .await;

        match written {
            Ok(()) => {
                tx.commit().await?;
                tracing::info!(
                    batch_id,
                    sites = sites.len(),
                    invalid = invalid.len(),
                    "saved analysis batch"
                );
                Ok(())
            }
            Err(error) => {
                if let Err(rollback_error) = tx.rollback().await {
                    tracing::warn!(batch_id, %rollback_error, "rollback after failed batch write failed");
                }
                Err(error)
            }
        }
    }
}
