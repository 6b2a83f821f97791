//! Closed enums for regions and row rejection reasons.
//!
//! `Region` serializes as its canonical display name (`"Greater Accra"`).
//! `RejectionReason` uses `snake_case` serialization via
//! `#[serde(rename_all = "snake_case")]`, matching the SQL storage form.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// Region
// ---------------------------------------------------------------------------

/// The administrative regions of Ghana recognized by the validator.
///
/// Variants are declared in alphabetical order of their canonical names, so
/// the derived `Ord` is the same ordering as comparing `as_str()`. The
/// aggregator's tie-break relies on this.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub enum Region {
    Ahafo,
    Ashanti,
    Bono,
    #[serde(rename = "Bono East")]
    BonoEast,
    Central,
    Eastern,
    #[serde(rename = "Greater Accra")]
    GreaterAccra,
    #[serde(rename = "North East")]
    NorthEast,
    Northern,
    Oti,
    Savannah,
    #[serde(rename = "Upper East")]
    UpperEast,
    #[serde(rename = "Upper West")]
    UpperWest,
    Volta,
    Western,
    #[serde(rename = "Western North")]
    WesternNorth,
}

impl Region {
    /// Every region, in canonical-name order.
    pub const ALL: [Self; 16] = [
        Self::Ahafo,
        Self::Ashanti,
        Self::Bono,
        Self::BonoEast,
        Self::Central,
        Self::Eastern,
        Self::GreaterAccra,
        Self::NorthEast,
        Self::Northern,
        Self::Oti,
        Self::Savannah,
        Self::UpperEast,
        Self::UpperWest,
        Self::Volta,
        Self::Western,
        Self::WesternNorth,
    ];

    /// Canonical display name, also the SQL storage form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ahafo => "Ahafo",
            Self::Ashanti => "Ashanti",
            Self::Bono => "Bono",
            Self::BonoEast => "Bono East",
            Self::Central => "Central",
            Self::Eastern => "Eastern",
            Self::GreaterAccra => "Greater Accra",
            Self::NorthEast => "North East",
            Self::Northern => "Northern",
            Self::Oti => "Oti",
            Self::Savannah => "Savannah",
            Self::UpperEast => "Upper East",
            Self::UpperWest => "Upper West",
            Self::Volta => "Volta",
            Self::Western => "Western",
            Self::WesternNorth => "Western North",
        }
    }

    /// Match free-form input against the closed set.
    ///
    /// Matching ignores ASCII case, surrounding whitespace, and collapses
    /// internal whitespace runs to a single space, so `" greater  ACCRA "`
    /// resolves to `GreaterAccra`.
    #[must_use]
    pub fn lookup(input: &str) -> Option<Self> {
        let normalized = input.split_whitespace().collect::<Vec<_>>().join(" ");
        Self::ALL
            .into_iter()
            .find(|region| region.as_str().eq_ignore_ascii_case(&normalized))
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| CoreError::Validation(format!("unknown region '{s}'")))
    }
}

// ---------------------------------------------------------------------------
// RejectionReason
// ---------------------------------------------------------------------------

/// Why a raw row was rejected. Exactly one reason per rejected row: the
/// first failing check wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    MissingCity,
    MissingRegion,
    InvalidRegion,
    NonNumericSites,
    NegativeSites,
    OutlierSites,
}

impl RejectionReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingCity => "missing_city",
            Self::MissingRegion => "missing_region",
            Self::InvalidRegion => "invalid_region",
            Self::NonNumericSites => "non_numeric_sites",
            Self::NegativeSites => "negative_sites",
            Self::OutlierSites => "outlier_sites",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
