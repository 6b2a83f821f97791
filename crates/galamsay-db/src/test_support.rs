//! Shared test utilities for galamsay-db unit tests.

pub(crate) mod helpers {
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use galamsay_core::entities::{AnalysisLog, InvalidRecord, Rejection, SiteRecord, ValidSite};
    use galamsay_core::enums::{Region, RejectionReason};

    use crate::GalamsayDb;
    use crate::service::GalamsayService;

    /// Create an in-memory service.
    pub async fn test_service() -> GalamsayService {
        let db = GalamsayDb::open_local(":memory:").await.unwrap();
        GalamsayService::from_db(db)
    }

    /// A fixed timestamp `offset_secs` after a base instant.
    pub fn at(offset_secs: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap() + Duration::seconds(offset_secs)
    }

    pub fn site(batch_id: &str, city: &str, region: Region, num_sites: u32) -> SiteRecord {
        ValidSite {
            city: city.into(),
            region,
            num_sites,
        }
        .into_record(batch_id, at(0))
    }

    pub fn invalid(batch_id: &str, row_number: u32, reason: RejectionReason) -> InvalidRecord {
        Rejection {
            row_number,
            city: Some("Tamale".into()),
            region: Some("Northern".into()),
            raw_value: Some("abc".into()),
            reason,
        }
        .into_record(batch_id, at(0))
    }

    /// A minimal log row for `batch_id` at `at(offset_secs)`.
    pub fn log(batch_id: &str, offset_secs: i64) -> AnalysisLog {
        AnalysisLog {
            batch_id: batch_id.into(),
            analysis_timestamp: at(offset_secs),
            total_sites: 35,
            valid_records: 2,
            invalid_records: 2,
            highest_region: Some(Region::Ashanti),
            highest_region_count: 25,
            average_per_region: 17.5,
            threshold_used: 15,
            cities_above_threshold: vec!["Kumasi".into()],
            region_summaries: vec![],
        }
    }
}
