//! Repository modules implementing the store operations.
//!
//! Each module adds methods to `GalamsayService` via `impl GalamsayService`
//! blocks. Rows are never updated or deleted once written.

pub mod batch;
pub mod invalid;
pub mod logs;
pub mod sites;
pub mod stats;

use crate::error::DatabaseError;
use crate::service::GalamsayService;

impl GalamsayService {
    /// Run `SELECT COUNT(*)`-style scalar queries.
    pub(crate) async fn query_count(&self, sql: &str) -> Result<u64, DatabaseError> {
        let mut rows = self.db().conn().query(sql, ()).await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::Corrupt(format!("no row returned for: {sql}")))?;
        crate::helpers::get_u64(&row, 0)
    }
}
