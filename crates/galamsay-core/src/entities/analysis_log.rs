use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::aggregator::Summary;
use crate::enums::Region;

/// Per-region breakdown carried alongside each analysis log row.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct RegionSummary {
    pub region: Region,
    pub total_sites: u64,
    pub city_count: u64,
    pub average_sites: f64,
    pub max_sites: u32,
    pub min_sites: u32,
}

/// The summary row written once per completed analysis run.
///
/// `batch_id` is unique across the store; the row is immutable.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct AnalysisLog {
    pub batch_id: String,
    pub analysis_timestamp: DateTime<Utc>,
    pub total_sites: u64,
    pub valid_records: u64,
    pub invalid_records: u64,
    pub highest_region: Option<Region>,
    pub highest_region_count: u64,
    pub average_per_region: f64,
    pub threshold_used: u32,
    /// Distinct city names whose summed sites exceed `threshold_used`, alphabetical.
    pub cities_above_threshold: Vec<String>,
    pub region_summaries: Vec<RegionSummary>,
}

impl AnalysisLog {
    /// Build the log row for a finished run from its aggregate summary.
    #[must_use]
    pub fn from_summary(
        batch_id: &str,
        analysis_timestamp: DateTime<Utc>,
        summary: &Summary,
        invalid_records: u64,
    ) -> Self {
        Self {
            batch_id: batch_id.to_string(),
            analysis_timestamp,
            total_sites: summary.total_sites,
            valid_records: summary.valid_records,
            invalid_records,
            highest_region: summary.highest_region.map(|top| top.region),
            highest_region_count: summary.highest_region.map_or(0, |top| top.total_sites),
            average_per_region: summary.average_per_region,
            threshold_used: summary.threshold,
            cities_above_threshold: summary.cities_above_threshold.clone(),
            region_summaries: summary.region_summaries.clone(),
        }
    }
}
