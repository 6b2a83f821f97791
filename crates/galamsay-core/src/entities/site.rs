use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Region;

/// A row that passed validation, not yet tagged with a batch.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ValidSite {
    pub city: String,
    pub region: Region,
    pub num_sites: u32,
}

impl ValidSite {
    /// Tag the site with the batch that accepted it.
    #[must_use]
    pub fn into_record(self, batch_id: &str, created_at: DateTime<Utc>) -> SiteRecord {
        SiteRecord {
            batch_id: batch_id.to_string(),
            city: self.city,
            region: self.region,
            num_sites: self.num_sites,
            created_at,
        }
    }
}

/// A persisted site count for one city, owned by one batch.
///
/// `num_sites` is always within `0..=OUTLIER_CEILING`; the validator is the
/// only producer.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SiteRecord {
    pub batch_id: String,
    pub city: String,
    pub region: Region,
    pub num_sites: u32,
    pub created_at: DateTime<Utc>,
}
