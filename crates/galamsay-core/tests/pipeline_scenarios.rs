//! End-to-end scenarios through the CSV source, validator, and aggregator.

use galamsay_core::aggregator::aggregate;
use galamsay_core::enums::{Region, RejectionReason};
use galamsay_core::source::read_rows;
use galamsay_core::validator::validate_all;
use pretty_assertions::assert_eq;

const FOUR_ROWS: &str = "City,Region,Number_of_Galamsay_Sites
Accra,Greater Accra,10
Kumasi,Ashanti,25
,Ashanti,5
Tamale,Northern,abc
";

#[test]
fn four_row_scenario() {
    let rows = read_rows(FOUR_ROWS.as_bytes(), "four_rows").unwrap();
    let validated = validate_all(&rows);
    assert_eq!(validated.valid.len(), 2);

    let reasons: Vec<RejectionReason> = validated.rejected.iter().map(|r| r.reason).collect();
    assert_eq!(
        reasons,
        vec![
            RejectionReason::MissingCity,
            RejectionReason::NonNumericSites
        ]
    );

    let summary = aggregate(&validated.valid, 15);
    assert_eq!(summary.total_sites, 35);
    assert_eq!(summary.highest_region.map(|t| t.region), Some(Region::Ashanti));
    assert_eq!(summary.cities_above_threshold, vec!["Kumasi".to_string()]);
}

#[test]
fn rejected_rows_never_reach_the_totals() {
    let csv = "City,Region,Number_of_Galamsay_Sites
Obuasi,Ashanti,500
Tarkwa,Western,501
Bolga,Upper East,-3
Ho,Atlantis,4
Wa,upper west,2
";
    let rows = read_rows(csv.as_bytes(), "mixed").unwrap();
    let validated = validate_all(&rows);

    let rejected: Vec<(u32, RejectionReason)> = validated
        .rejected
        .iter()
        .map(|r| (r.row_number, r.reason))
        .collect();
    assert_eq!(
        rejected,
        vec![
            (2, RejectionReason::OutlierSites),
            (3, RejectionReason::NegativeSites),
            (4, RejectionReason::InvalidRegion),
        ]
    );

    let summary = aggregate(&validated.valid, 10);
    assert_eq!(summary.total_sites, 502);
    assert_eq!(summary.valid_records, 2);
    let wa = validated.valid.iter().find(|s| s.city == "Wa").unwrap();
    assert_eq!(wa.region, Region::UpperWest);
}
