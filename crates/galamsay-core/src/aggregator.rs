//! Statistics over a set of validated sites.
//!
//! All grouping goes through `BTreeMap` so every ordering in the output is
//! fixed by key order, never by hash iteration order.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{RegionSummary, ValidSite};
use crate::enums::Region;

/// A region and its summed site count.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RegionTotal {
    pub region: Region,
    pub total_sites: u64,
}

/// A city and its summed site count across all of its records.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CityTotal {
    pub city: String,
    pub total_sites: u64,
}

/// Output of [`aggregate`].
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Summary {
    pub total_sites: u64,
    pub valid_records: u64,
    /// `None` only when there are no valid records.
    pub highest_region: Option<RegionTotal>,
    pub threshold: u32,
    pub cities_above_threshold: Vec<String>,
    pub average_per_region: f64,
    pub region_summaries: Vec<RegionSummary>,
}

/// Compute every statistic in one pass over `sites`.
///
/// Never fails: an empty input yields zero totals, an empty city list, and
/// no highest region.
#[must_use]
pub fn aggregate(sites: &[ValidSite], threshold: u32) -> Summary {
    let by_region = region_totals(sites);
    let total_sites = total_sites(sites);

    Summary {
        total_sites,
        valid_records: sites.len() as u64,
        highest_region: highest_region(&by_region),
        threshold,
        cities_above_threshold: cities_above_threshold(sites, threshold),
        average_per_region: average_per_region(total_sites, by_region.len()),
        region_summaries: region_summaries(sites),
    }
}

/// Sum of `num_sites` over exactly the given sites.
#[must_use]
pub fn total_sites(sites: &[ValidSite]) -> u64 {
    sites.iter().map(|s| u64::from(s.num_sites)).sum()
}

/// Summed sites per region, keyed in canonical-name order.
#[must_use]
pub fn region_totals(sites: &[ValidSite]) -> BTreeMap<Region, u64> {
    let mut totals = BTreeMap::new();
    for site in sites {
        *totals.entry(site.region).or_insert(0) += u64::from(site.num_sites);
    }
    totals
}

/// Region with the largest summed count.
///
/// Ties resolve to the region whose canonical name sorts first: the map is
/// walked in key order and only a strictly larger total replaces the leader.
#[must_use]
pub fn highest_region(totals: &BTreeMap<Region, u64>) -> Option<RegionTotal> {
    let mut best: Option<RegionTotal> = None;
    for (&region, &total_sites) in totals {
        if best.is_none_or(|b| total_sites > b.total_sites) {
            best = Some(RegionTotal {
                region,
                total_sites,
            });
        }
    }
    best
}

/// Summed sites per distinct city, alphabetical.
#[must_use]
pub fn city_totals(sites: &[ValidSite]) -> BTreeMap<&str, u64> {
    let mut totals = BTreeMap::new();
    for site in sites {
        *totals.entry(site.city.as_str()).or_insert(0) += u64::from(site.num_sites);
    }
    totals
}

/// Cities whose summed count is strictly greater than `threshold`, with totals.
#[must_use]
pub fn city_totals_above(sites: &[ValidSite], threshold: u32) -> Vec<CityTotal> {
    city_totals(sites)
        .into_iter()
        .filter(|(_, total)| *total > u64::from(threshold))
        .map(|(city, total_sites)| CityTotal {
            city: city.to_string(),
            total_sites,
        })
        .collect()
}

/// Names of the cities returned by [`city_totals_above`].
#[must_use]
pub fn cities_above_threshold(sites: &[ValidSite], threshold: u32) -> Vec<String> {
    city_totals_above(sites, threshold)
        .into_iter()
        .map(|c| c.city)
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn average_per_region(total_sites: u64, region_count: usize) -> f64 {
    if region_count == 0 {
        return 0.0;
    }
    total_sites as f64 / region_count as f64
}

/// Per-region breakdown, largest total first; equal totals in name order.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn region_summaries(sites: &[ValidSite]) -> Vec<RegionSummary> {
    let mut grouped: BTreeMap<Region, Vec<u32>> = BTreeMap::new();
    for site in sites {
        grouped.entry(site.region).or_default().push(site.num_sites);
    }

    let mut summaries: Vec<RegionSummary> = grouped
        .into_iter()
        .map(|(region, counts)| {
            let total_sites: u64 = counts.iter().copied().map(u64::from).sum();
            let city_count = counts.len() as u64;
            RegionSummary {
                region,
                total_sites,
                city_count,
                average_sites: total_sites as f64 / city_count as f64,
                max_sites: counts.iter().copied().max().unwrap_or(0),
                min_sites: counts.iter().copied().min().unwrap_or(0),
            }
        })
        .collect();

    // Stable sort keeps name order among equal totals.
    summaries.sort_by(|a, b| b.total_sites.cmp(&a.total_sites));
    summaries
}
