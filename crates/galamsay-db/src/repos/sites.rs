//! Site record repository.

use galamsay_core::entities::{SiteRecord, ValidSite};
use galamsay_core::enums::Region;

use crate::error::DatabaseError;
use crate::helpers::{format_datetime, get_u32, parse_datetime, parse_enum};
use crate::service::GalamsayService;

/// Filter criteria for site queries. All fields combine with AND.
#[derive(Debug, Default, Clone)]
pub struct SiteFilter {
    pub batch_id: Option<String>,
    pub region: Option<Region>,
    pub city: Option<String>,
    pub limit: Option<u32>,
}

impl SiteFilter {
    /// Only `region` is set: results rank the region's cities by site count.
    const fn is_region_only(&self) -> bool {
        self.region.is_some() && self.batch_id.is_none() && self.city.is_none()
    }
}

fn row_to_site(row: &libsql::Row) -> Result<SiteRecord, DatabaseError> {
    Ok(SiteRecord {
        batch_id: row.get::<String>(0)?,
        city: row.get::<String>(1)?,
        region: parse_enum(&row.get::<String>(2)?)?,
        num_sites: get_u32(row, 3)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

/// Insert site records on `conn`, which may be a transaction.
pub(crate) async fn insert_sites(
    conn: &libsql::Connection,
    sites: &[SiteRecord],
) -> Result<(), DatabaseError> {
    for site in sites {
        conn.execute(
            "INSERT INTO galamsay_sites (batch_id, city, region, num_sites, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            libsql::params![
                site.batch_id.as_str(),
                site.city.as_str(),
                site.region.as_str(),
                site.num_sites,
                format_datetime(&site.created_at)
            ],
        )
        .await?;
    }
    Ok(())
}

impl GalamsayService {
    /// Append validated sites under `batch_id`. All rows or none are written.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::StorageUnavailable` if the write fails.
    pub async fn save_sites(
        &self,
        batch_id: &str,
        sites: &[ValidSite],
    ) -> Result<Vec<SiteRecord>, DatabaseError> {
        let created_at = self.recorder().timestamp();
        let records: Vec<SiteRecord> = sites
            .iter()
            .cloned()
            .map(|site| site.into_record(batch_id, created_at))
            .collect();

        let tx = self.db().begin_write().await?;
        insert_sites(&tx, &records).await?;
        tx.commit().await?;

        tracing::debug!(batch_id, count = records.len(), "saved site records");
        Ok(records)
    }

    /// Query site records.
    ///
    /// Ordered by region then city, except a region-only filter, which
    /// orders by site count descending.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a row cannot be decoded.
    pub async fn get_sites(&self, filter: &SiteFilter) -> Result<Vec<SiteRecord>, DatabaseError> {
        let mut conditions = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(ref batch_id) = filter.batch_id {
            params.push(libsql::Value::Text(batch_id.clone()));
            conditions.push(format!("batch_id = ?{}", params.len()));
        }
        if let Some(region) = filter.region {
            params.push(libsql::Value::Text(region.as_str().to_string()));
            conditions.push(format!("region = ?{}", params.len()));
        }
        if let Some(ref city) = filter.city {
            params.push(libsql::Value::Text(city.clone()));
            conditions.push(format!("city = ?{}", params.len()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };
        let order_by = if filter.is_region_only() {
            "num_sites DESC, city, id"
        } else {
            "region, city, id"
        };
        let limit_clause = filter
            .limit
            .map_or_else(String::new, |limit| format!("LIMIT {limit}"));

        let sql = format!(
            "SELECT batch_id, city, region, num_sites, created_at
             FROM galamsay_sites {where_clause}
             ORDER BY {order_by} {limit_clause}"
        );

        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let mut sites = Vec::new();
        while let Some(row) = rows.next().await? {
            sites.push(row_to_site(&row)?);
        }
        Ok(sites)
    }
}
