//! Analysis log repository. One immutable row per batch.

use galamsay_core::entities::AnalysisLog;
use galamsay_core::enums::Region;

use crate::error::{DatabaseError, is_unique_violation};
use crate::helpers::{
    format_datetime, get_opt_string, get_u32, get_u64, parse_datetime, parse_enum, parse_json,
    to_json_text, to_sql_int,
};
use crate::service::GalamsayService;

const LOG_COLUMNS: &str = "batch_id, analysis_timestamp, total_sites, valid_records, \
     invalid_records, highest_region, highest_region_count, average_per_region, \
     threshold_used, cities_above_threshold, region_summaries";

fn row_to_log(row: &libsql::Row) -> Result<AnalysisLog, DatabaseError> {
    Ok(AnalysisLog {
        batch_id: row.get::<String>(0)?,
        analysis_timestamp: parse_datetime(&row.get::<String>(1)?)?,
        total_sites: get_u64(row, 2)?,
        valid_records: get_u64(row, 3)?,
        invalid_records: get_u64(row, 4)?,
        highest_region: get_opt_string(row, 5)?
            .map(|name| parse_enum::<Region>(&name))
            .transpose()?,
        highest_region_count: get_u64(row, 6)?,
        average_per_region: row.get::<f64>(7)?,
        threshold_used: get_u32(row, 8)?,
        cities_above_threshold: parse_json(&row.get::<String>(9)?)?,
        region_summaries: parse_json(&row.get::<String>(10)?)?,
    })
}

pub(crate) async fn log_exists(
    conn: &libsql::Connection,
    batch_id: &str,
) -> Result<bool, DatabaseError> {
    let mut rows = conn
        .query("SELECT 1 FROM analysis_log WHERE batch_id = ?1", [batch_id])
        .await?;
    Ok(rows.next().await?.is_some())
}

/// Insert one log row on `conn`, which may be a transaction.
///
/// Checks for an existing row first so the duplicate case never reaches
/// the constraint; the constraint mapping covers a concurrent writer.
pub(crate) async fn insert_log(
    conn: &libsql::Connection,
    log: &AnalysisLog,
) -> Result<(), DatabaseError> {
    if log_exists(conn, &log.batch_id).await? {
        return Err(DatabaseError::DuplicateBatch(log.batch_id.clone()));
    }

    let result = conn
        .execute(
            &format!(
                "INSERT INTO analysis_log ({LOG_COLUMNS})
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)"
            ),
            libsql::params![
                log.batch_id.as_str(),
                format_datetime(&log.analysis_timestamp),
                to_sql_int(log.total_sites, "total_sites")?,
                to_sql_int(log.valid_records, "valid_records")?,
                to_sql_int(log.invalid_records, "invalid_records")?,
                log.highest_region.map(Region::as_str),
                to_sql_int(log.highest_region_count, "highest_region_count")?,
                log.average_per_region,
                log.threshold_used,
                to_json_text(&log.cities_above_threshold)?,
                to_json_text(&log.region_summaries)?
            ],
        )
        .await;

    match result {
        Ok(_) => Ok(()),
        Err(e) if is_unique_violation(&e) => Err(DatabaseError::DuplicateBatch(log.batch_id.clone())),
        Err(e) => Err(e.into()),
    }
}

impl GalamsayService {
    /// Write the analysis log row for a batch.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::DuplicateBatch` if the batch already has a log
    /// row; the existing row is left untouched.
    pub async fn save_log(&self, log: &AnalysisLog) -> Result<(), DatabaseError> {
        insert_log(self.db().conn(), log).await?;
        tracing::debug!(batch_id = %log.batch_id, "saved analysis log");
        Ok(())
    }

    /// The most recent log by analysis timestamp, newest insert first on ties.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or the row cannot be decoded.
    pub async fn get_latest_log(&self) -> Result<Option<AnalysisLog>, DatabaseError> {
        Ok(self.get_all_logs(Some(1)).await?.into_iter().next())
    }

    /// The log for `batch_id`, if any.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or the row cannot be decoded.
    pub async fn get_log(&self, batch_id: &str) -> Result<Option<AnalysisLog>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {LOG_COLUMNS} FROM analysis_log WHERE batch_id = ?1"),
                [batch_id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_log(&row)?)),
            None => Ok(None),
        }
    }

    /// Like [`Self::get_log`], but absence is an error.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no log exists for `batch_id`.
    pub async fn require_log(&self, batch_id: &str) -> Result<AnalysisLog, DatabaseError> {
        self.get_log(batch_id)
            .await?
            .ok_or_else(|| DatabaseError::NotFound {
                entity_type: "analysis_log".into(),
                id: batch_id.to_string(),
            })
    }

    /// All logs, most recent first, optionally capped at `limit`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a row cannot be decoded.
    pub async fn get_all_logs(&self, limit: Option<u32>) -> Result<Vec<AnalysisLog>, DatabaseError> {
        let limit_clause = limit.map_or_else(String::new, |limit| format!("LIMIT {limit}"));
        let sql = format!(
            "SELECT {LOG_COLUMNS} FROM analysis_log
             ORDER BY analysis_timestamp DESC, id DESC {limit_clause}"
        );

        let mut rows = self.db().conn().query(&sql, ()).await?;
        let mut logs = Vec::new();
        while let Some(row) = rows.next().await? {
            logs.push(row_to_log(&row)?);
        }
        Ok(logs)
    }
}
