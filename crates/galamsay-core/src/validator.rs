//! Row validator.
//!
//! Classifies each [`RawRow`] as a [`ValidSite`] or a [`Rejection`]. Checks
//! run in a fixed order and the first failure wins:
//!
//! ```text
//! city present → region present → region known → sites integer → sites ≥ 0 → sites ≤ 500
//! ```

use std::num::IntErrorKind;

use crate::entities::{RawRow, Rejection, ValidSite};
use crate::enums::{Region, RejectionReason};

/// Largest site count accepted as realistic. Inclusive.
pub const OUTLIER_CEILING: u32 = 500;

/// Rows split into the two partitions, each in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validated {
    pub valid: Vec<ValidSite>,
    pub rejected: Vec<Rejection>,
}

/// Validate one row.
///
/// # Errors
///
/// Returns the [`Rejection`] describing the first failed check. This is
/// data, not a failure of the pipeline.
pub fn validate(row: &RawRow) -> Result<ValidSite, Rejection> {
    let reject = |reason| Rejection {
        row_number: row.row_number,
        city: row.city.clone(),
        region: row.region.clone(),
        raw_value: row.num_sites.clone(),
        reason,
    };

    let Some(city) = present(row.city.as_deref()) else {
        return Err(reject(RejectionReason::MissingCity));
    };
    let Some(region_raw) = present(row.region.as_deref()) else {
        return Err(reject(RejectionReason::MissingRegion));
    };
    let Some(region) = Region::lookup(region_raw) else {
        return Err(reject(RejectionReason::InvalidRegion));
    };
    let num_sites = parse_sites(row.num_sites.as_deref()).map_err(reject)?;

    Ok(ValidSite {
        city: city.to_string(),
        region,
        num_sites,
    })
}

/// Validate every row, preserving input order in both partitions.
#[must_use]
pub fn validate_all<'a, I>(rows: I) -> Validated
where
    I: IntoIterator<Item = &'a RawRow>,
{
    let mut out = Validated::default();
    for row in rows {
        match validate(row) {
            Ok(site) => out.valid.push(site),
            Err(rejection) => out.rejected.push(rejection),
        }
    }
    out
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_sites(raw: Option<&str>) -> Result<u32, RejectionReason> {
    let Some(raw) = present(raw) else {
        return Err(RejectionReason::NonNumericSites);
    };
    let value = match raw.parse::<i64>() {
        Ok(value) => value,
        Err(e) => {
            return Err(match e.kind() {
                IntErrorKind::PosOverflow => RejectionReason::OutlierSites,
                IntErrorKind::NegOverflow => RejectionReason::NegativeSites,
                _ => RejectionReason::NonNumericSites,
            });
        }
    };
    if value < 0 {
        return Err(RejectionReason::NegativeSites);
    }
    match u32::try_from(value) {
        Ok(count) if count <= OUTLIER_CEILING => Ok(count),
        _ => Err(RejectionReason::OutlierSites),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn row(city: Option<&str>, region: Option<&str>, sites: Option<&str>) -> RawRow {
        RawRow::new(1, city, region, sites)
    }

    fn reason_of(r: &RawRow) -> RejectionReason {
        validate(r).expect_err("row should be rejected").reason
    }

    #[test]
    fn accepts_well_formed_row() {
        let site = validate(&row(Some("Obuasi"), Some("Ashanti"), Some("42"))).unwrap();
        assert_eq!(
            site,
            ValidSite {
                city: "Obuasi".into(),
                region: Region::Ashanti,
                num_sites: 42,
            }
        );
    }

    #[test]
    fn region_is_canonicalized() {
        let site = validate(&row(Some("Tema"), Some("greater accra"), Some("3"))).unwrap();
        assert_eq!(site.region, Region::GreaterAccra);
    }

    #[rstest]
    #[case(Some("abc"))]
    #[case(Some("eleven"))]
    #[case(Some("10.5"))]
    #[case(Some("10.0"))]
    #[case(Some("1e3"))]
    #[case(Some("12 sites"))]
    #[case(None)]
    fn non_numeric_sites_never_yield_a_site(#[case] sites: Option<&str>) {
        let r = row(Some("Tamale"), Some("Northern"), sites);
        assert_eq!(reason_of(&r), RejectionReason::NonNumericSites);
    }

    #[rstest]
    #[case("0", 0)]
    #[case("500", 500)]
    #[case("+7", 7)]
    #[case(" 25 ", 25)]
    fn boundary_counts_are_accepted(#[case] sites: &str, #[case] expected: u32) {
        let site = validate(&row(Some("Kumasi"), Some("Ashanti"), Some(sites))).unwrap();
        assert_eq!(site.num_sites, expected);
    }

    #[rstest]
    #[case("501", RejectionReason::OutlierSites)]
    #[case("4294967296", RejectionReason::OutlierSites)]
    #[case("99999999999999999999999", RejectionReason::OutlierSites)]
    #[case("-3", RejectionReason::NegativeSites)]
    #[case("-1", RejectionReason::NegativeSites)]
    #[case("-99999999999999999999999", RejectionReason::NegativeSites)]
    fn out_of_range_counts_are_classified(#[case] sites: &str, #[case] expected: RejectionReason) {
        let r = row(Some("Kumasi"), Some("Ashanti"), Some(sites));
        assert_eq!(reason_of(&r), expected);
    }

    #[test]
    fn first_failing_check_wins() {
        // Missing city beats every later problem.
        assert_eq!(
            reason_of(&row(None, Some("Nowhere"), Some("abc"))),
            RejectionReason::MissingCity
        );
        assert_eq!(
            reason_of(&row(Some("Tamale"), None, Some("-3"))),
            RejectionReason::MissingRegion
        );
        assert_eq!(
            reason_of(&row(Some("Tamale"), Some("Nowhere"), Some("abc"))),
            RejectionReason::InvalidRegion
        );
    }

    #[test]
    fn blank_fields_count_as_missing() {
        let r = RawRow {
            row_number: 2,
            city: Some("   ".into()),
            region: Some("Ashanti".into()),
            num_sites: Some("5".into()),
        };
        assert_eq!(reason_of(&r), RejectionReason::MissingCity);

        let r = RawRow {
            row_number: 2,
            city: Some("Kumasi".into()),
            region: Some("\t".into()),
            num_sites: Some("5".into()),
        };
        assert_eq!(reason_of(&r), RejectionReason::MissingRegion);
    }

    #[test]
    fn rejection_keeps_raw_cells() {
        let r = RawRow::new(9, Some("Tamale"), Some("Northern"), Some("abc"));
        let rejection = validate(&r).unwrap_err();
        assert_eq!(rejection.row_number, 9);
        assert_eq!(rejection.city.as_deref(), Some("Tamale"));
        assert_eq!(rejection.region.as_deref(), Some("Northern"));
        assert_eq!(rejection.raw_value.as_deref(), Some("abc"));

        let padded = RawRow::new(10, Some("Tamale "), Some("Northern"), Some(" -3 "));
        let rejection = validate(&padded).unwrap_err();
        assert_eq!(rejection.reason, RejectionReason::NegativeSites);
        assert_eq!(rejection.raw_value.as_deref(), Some(" -3 "));
        assert_eq!(rejection.city.as_deref(), Some("Tamale "));
    }

    #[test]
    fn validate_all_partitions_in_order() {
        let rows = vec![
            RawRow::new(1, Some("Accra"), Some("Greater Accra"), Some("10")),
            RawRow::new(2, Some("Kumasi"), Some("Ashanti"), Some("25")),
            RawRow::new(3, None, Some("Ashanti"), Some("5")),
            RawRow::new(4, Some("Tamale"), Some("Northern"), Some("abc")),
        ];
        let out = validate_all(&rows);

        let cities: Vec<&str> = out.valid.iter().map(|s| s.city.as_str()).collect();
        assert_eq!(cities, vec!["Accra", "Kumasi"]);

        let reasons: Vec<(u32, RejectionReason)> = out
            .rejected
            .iter()
            .map(|r| (r.row_number, r.reason))
            .collect();
        assert_eq!(
            reasons,
            vec![
                (3, RejectionReason::MissingCity),
                (4, RejectionReason::NonNumericSites),
            ]
        );
    }
}
