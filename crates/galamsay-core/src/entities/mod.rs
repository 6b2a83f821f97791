//! Entity structs for the galamsay domain.
//!
//! Each persisted entity maps to a table in the libSQL store
//! (`galamsay_sites`, `invalid_records`, `analysis_log`). All structs derive
//! `Serialize`, `Deserialize`, and `JsonSchema` for JSON output and schema
//! validation.

mod analysis_log;
mod invalid;
mod raw_row;
mod site;

pub use analysis_log::{AnalysisLog, RegionSummary};
pub use invalid::{InvalidRecord, InvalidRow, Rejection};
pub use raw_row::RawRow;
pub use site::{SiteRecord, ValidSite};
