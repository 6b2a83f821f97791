//! CLI response types returned as JSON by `galamsay` commands.
//!
//! The headline-statistic responses (`total`, `highest-region`, `averages`)
//! come either from the latest stored log or from a live pass over the CSV;
//! [`StatSource`] records which.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::aggregator::{CityTotal, Summary};
use crate::entities::{AnalysisLog, InvalidRow, RegionSummary, SiteRecord};
use crate::enums::Region;

/// Where a headline statistic was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum StatSource {
    Database,
    LiveCalculation,
}

/// Response from `galamsay analyze`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct AnalyzeResponse {
    pub log: AnalysisLog,
    pub invalid: Vec<InvalidRow>,
}

/// Response from `galamsay total`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TotalResponse {
    pub total_sites: u64,
    pub batch_id: Option<String>,
    pub source: StatSource,
}

/// Response from `galamsay highest-region`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct HighestRegionResponse {
    pub region: Option<Region>,
    pub total_sites: u64,
    pub batch_id: Option<String>,
    pub source: StatSource,
}

/// Response from `galamsay averages`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct AveragesResponse {
    pub average_per_region: f64,
    pub region_summaries: Vec<RegionSummary>,
    pub batch_id: Option<String>,
    pub source: StatSource,
}

impl TotalResponse {
    #[must_use]
    pub fn from_log(log: &AnalysisLog) -> Self {
        Self {
            total_sites: log.total_sites,
            batch_id: Some(log.batch_id.clone()),
            source: StatSource::Database,
        }
    }

    #[must_use]
    pub const fn from_summary(summary: &Summary) -> Self {
        Self {
            total_sites: summary.total_sites,
            batch_id: None,
            source: StatSource::LiveCalculation,
        }
    }
}

impl HighestRegionResponse {
    #[must_use]
    pub fn from_log(log: &AnalysisLog) -> Self {
        Self {
            region: log.highest_region,
            total_sites: log.highest_region_count,
            batch_id: Some(log.batch_id.clone()),
            source: StatSource::Database,
        }
    }

    #[must_use]
    pub fn from_summary(summary: &Summary) -> Self {
        Self {
            region: summary.highest_region.map(|top| top.region),
            total_sites: summary.highest_region.map_or(0, |top| top.total_sites),
            batch_id: None,
            source: StatSource::LiveCalculation,
        }
    }
}

impl AveragesResponse {
    #[must_use]
    pub fn from_log(log: &AnalysisLog) -> Self {
        Self {
            average_per_region: log.average_per_region,
            region_summaries: log.region_summaries.clone(),
            batch_id: Some(log.batch_id.clone()),
            source: StatSource::Database,
        }
    }

    #[must_use]
    pub fn from_summary(summary: &Summary) -> Self {
        Self {
            average_per_region: summary.average_per_region,
            region_summaries: summary.region_summaries.clone(),
            batch_id: None,
            source: StatSource::LiveCalculation,
        }
    }
}

/// Response from `galamsay cities-above`. Always computed live.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CitiesAboveResponse {
    pub threshold: u32,
    pub cities: Vec<CityTotal>,
    pub count: usize,
}

/// Response from `galamsay logs`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct LogsResponse {
    pub logs: Vec<AnalysisLog>,
    pub count: usize,
}

/// Response from `galamsay sites`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SitesResponse {
    pub sites: Vec<SiteRecord>,
    pub count: usize,
}

/// Response from `galamsay invalid`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct InvalidResponse {
    pub records: Vec<InvalidRow>,
    pub count: usize,
}
