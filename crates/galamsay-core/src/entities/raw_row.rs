use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One input row as handed over by the CSV source, before validation.
///
/// Absent and blank cells are both `None`; downstream code never has to
/// guess whether a field was present. Non-blank cells are kept exactly as
/// read, surrounding whitespace included, so rejected rows can be audited
/// against the input. The validator trims.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based position among the data rows (the header is not counted).
    pub row_number: u32,
    pub city: Option<String>,
    pub region: Option<String>,
    pub num_sites: Option<String>,
}

impl RawRow {
    /// Build a row from optional cell values, folding blank cells into `None`.
    #[must_use]
    pub fn new(
        row_number: u32,
        city: Option<&str>,
        region: Option<&str>,
        num_sites: Option<&str>,
    ) -> Self {
        Self {
            row_number,
            city: non_blank(city),
            region: non_blank(region),
            num_sites: non_blank(num_sites),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(String::from)
}
