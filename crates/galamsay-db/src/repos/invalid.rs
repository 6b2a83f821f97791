//! Invalid record repository. Rejected rows are kept for audit only.

use galamsay_core::entities::{InvalidRecord, Rejection};

use crate::error::DatabaseError;
use crate::helpers::{format_datetime, get_opt_string, get_u32, parse_datetime, parse_enum};
use crate::service::GalamsayService;

/// Filter criteria for invalid record queries.
#[derive(Debug, Default, Clone)]
pub struct InvalidFilter {
    pub batch_id: Option<String>,
    pub limit: Option<u32>,
}

fn row_to_invalid(row: &libsql::Row) -> Result<InvalidRecord, DatabaseError> {
    Ok(InvalidRecord {
        batch_id: row.get::<String>(0)?,
        row_number: get_u32(row, 1)?,
        city: get_opt_string(row, 2)?,
        region: get_opt_string(row, 3)?,
        raw_value: get_opt_string(row, 4)?,
        reason: parse_enum(&row.get::<String>(5)?)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

pub(crate) async fn insert_invalid(
    conn: &libsql::Connection,
    records: &[InvalidRecord],
) -> Result<(), DatabaseError> {
    for record in records {
        conn.execute(
            "INSERT INTO invalid_records (batch_id, row_number, city, region, raw_value, reason, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            libsql::params![
                record.batch_id.as_str(),
                record.row_number,
                record.city.as_deref(),
                record.region.as_deref(),
                record.raw_value.as_deref(),
                record.reason.as_str(),
                format_datetime(&record.created_at)
            ],
        )
        .await?;
    }
    Ok(())
}

impl GalamsayService {
    /// Append rejected rows under `batch_id`. All rows or none are written.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::StorageUnavailable` if the write fails.
    pub async fn save_invalid(
        &self,
        batch_id: &str,
        rejections: &[Rejection],
    ) -> Result<Vec<InvalidRecord>, DatabaseError> {
        let created_at = self.recorder().timestamp();
        let records: Vec<InvalidRecord> = rejections
            .iter()
            .cloned()
            .map(|rejection| rejection.into_record(batch_id, created_at))
            .collect();

        let tx = self.db().begin_write().await?;
        insert_invalid(&tx, &records).await?;
        tx.commit().await?;

        tracing::debug!(batch_id, count = records.len(), "saved invalid records");
        Ok(records)
    }

    /// Query invalid records, ordered by batch then row number.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a row cannot be decoded.
    pub async fn get_invalid(
        &self,
        filter: &InvalidFilter,
    ) -> Result<Vec<InvalidRecord>, DatabaseError> {
        let mut params: Vec<libsql::Value> = Vec::new();
        let where_clause = match filter.batch_id {
            Some(ref batch_id) => {
                params.push(libsql::Value::Text(batch_id.clone()));
                "WHERE batch_id = ?1"
            }
            None => "",
        };
        let limit_clause = filter
            .limit
            .map_or_else(String::new, |limit| format!("LIMIT {limit}"));

        let sql = format!(
            "SELECT batch_id, row_number, city, region, raw_value, reason, created_at
             FROM invalid_records {where_clause}
             ORDER BY batch_id, row_number, id {limit_clause}"
        );

        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let mut records = Vec::new();
        while let Some(row) = rows.next().await? {
            records.push(row_to_invalid(&row)?);
        }
        Ok(records)
    }
}
