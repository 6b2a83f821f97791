//! The analysis pipeline: validate, aggregate, mint a batch, persist.

use galamsay_core::aggregator::aggregate;
use galamsay_core::entities::{AnalysisLog, InvalidRecord, RawRow, SiteRecord};
use galamsay_core::validator::validate_all;

use crate::error::DatabaseError;
use crate::service::GalamsayService;

/// Everything one run wrote, as stored.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRun {
    pub log: AnalysisLog,
    pub sites: Vec<SiteRecord>,
    pub invalid: Vec<InvalidRecord>,
}

impl GalamsayService {
    /// Run one analysis over `rows` and persist it as a fresh batch.
    ///
    /// Rejected rows are recorded, never raised. The batch is written in a
    /// single transaction.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Core` if no batch id can be minted and any
    /// [`Self::save_batch`] error otherwise.
    pub async fn run_analysis(
        &self,
        rows: &[RawRow],
        threshold: u32,
    ) -> Result<AnalysisRun, DatabaseError> {
        let validated = validate_all(rows);
        let summary = aggregate(&validated.valid, threshold);

        let analysis_timestamp = self.recorder().timestamp();
        let batch_id = self.recorder().start_batch_at(analysis_timestamp)?;
        tracing::debug!(
            batch_id = %batch_id,
            rows = rows.len(),
            valid = validated.valid.len(),
            rejected = validated.rejected.len(),
            "validated input rows"
        );

        let log = AnalysisLog::from_summary(
            &batch_id,
            analysis_timestamp,
            &summary,
            validated.rejected.len() as u64,
        );
        let sites: Vec<SiteRecord> = validated
            .valid
            .into_iter()
            .map(|site| site.into_record(&batch_id, analysis_timestamp))
            .collect();
        let invalid: Vec<InvalidRecord> = validated
            .rejected
            .into_iter()
            .map(|rejection| rejection.into_record(&batch_id, analysis_timestamp))
            .collect();

        self.save_batch(&log, &sites, &invalid).await?;
        Ok(AnalysisRun {
            log,
            sites,
            invalid,
        })
    }
}

#[cfg(test)]
mod tests {
    use galamsay_core::batch::BATCH_TIME_FORMAT;
    use galamsay_core::enums::{Region, RejectionReason};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::repos::invalid::InvalidFilter;
    use crate::repos::sites::SiteFilter;
    use crate::test_support::helpers::test_service;

    fn four_rows() -> Vec<RawRow> {
        vec![
            RawRow::new(1, Some("Accra"), Some("Greater Accra"), Some("10")),
            RawRow::new(2, Some("Kumasi"), Some("Ashanti"), Some("25")),
            RawRow::new(3, None, Some("Ashanti"), Some("5")),
            RawRow::new(4, Some("Tamale"), Some("Northern"), Some("abc")),
        ]
    }

    #[tokio::test]
    async fn four_row_scenario_is_persisted() {
        let svc = test_service().await;
        let run = svc.run_analysis(&four_rows(), 15).await.unwrap();

        assert_eq!(run.log.total_sites, 35);
        assert_eq!(run.log.highest_region, Some(Region::Ashanti));
        assert_eq!(run.log.highest_region_count, 25);
        assert_eq!(run.log.cities_above_threshold, vec!["Kumasi".to_string()]);
        assert_eq!(run.log.valid_records, 2);
        assert_eq!(run.log.invalid_records, 2);
        assert_eq!(run.log.threshold_used, 15);

        let stored_log = svc.require_log(&run.log.batch_id).await.unwrap();
        assert_eq!(stored_log, run.log);

        let filter = SiteFilter {
            batch_id: Some(run.log.batch_id.clone()),
            ..Default::default()
        };
        assert_eq!(svc.get_sites(&filter).await.unwrap().len(), 2);

        let invalid = svc
            .get_invalid(&InvalidFilter {
                batch_id: Some(run.log.batch_id.clone()),
                ..Default::default()
            })
            .await
            .unwrap();
        let reasons: Vec<RejectionReason> = invalid.iter().map(|r| r.reason).collect();
        assert_eq!(
            reasons,
            vec![
                RejectionReason::MissingCity,
                RejectionReason::NonNumericSites
            ]
        );
        assert_eq!(invalid, run.invalid);
    }

    #[tokio::test]
    async fn empty_input_still_records_a_batch() {
        let svc = test_service().await;
        let run = svc.run_analysis(&[], 10).await.unwrap();
        assert_eq!(run.log.total_sites, 0);
        assert_eq!(run.log.highest_region, None);
        assert!(run.sites.is_empty());
        assert_eq!(svc.stats().await.unwrap().total_batches, 1);
    }

    #[tokio::test]
    async fn each_run_gets_its_own_batch() {
        let svc = test_service().await;
        let first = svc.run_analysis(&four_rows(), 10).await.unwrap();
        let second = svc.run_analysis(&four_rows(), 10).await.unwrap();
        assert_ne!(first.log.batch_id, second.log.batch_id);

        let latest = svc.get_latest_log().await.unwrap().unwrap();
        assert_eq!(latest.batch_id, second.log.batch_id);
        assert_eq!(svc.stats().await.unwrap().total_site_records, 4);
    }

    #[tokio::test]
    async fn batch_id_names_the_analysis_instant() {
        let svc = test_service().await;
        let run = svc.run_analysis(&four_rows(), 10).await.unwrap();
        let time_part = run
            .log
            .analysis_timestamp
            .format(BATCH_TIME_FORMAT)
            .to_string();
        assert!(
            run.log.batch_id.starts_with(&format!("{time_part}-")),
            "{} vs {time_part}",
            run.log.batch_id
        );
        assert!(run.sites.iter().all(|s| s.created_at == run.log.analysis_timestamp));
    }

    #[tokio::test]
    async fn rejected_cells_are_stored_as_read() {
        let svc = test_service().await;
        let rows = vec![
            RawRow::new(1, Some(" Tamale "), Some("Northern"), Some(" 12 sites ")),
            RawRow::new(2, Some(" Obuasi "), Some(" ashanti "), Some(" 7 ")),
        ];
        let run = svc.run_analysis(&rows, 10).await.unwrap();

        let stored = svc.get_invalid(&InvalidFilter::default()).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].raw_value.as_deref(), Some(" 12 sites "));
        assert_eq!(stored[0].city.as_deref(), Some(" Tamale "));

        assert_eq!(run.sites[0].city, "Obuasi");
        assert_eq!(run.sites[0].region, Region::Ashanti);
        assert_eq!(run.sites[0].num_sites, 7);
    }
}
