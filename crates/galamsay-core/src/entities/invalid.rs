use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::RejectionReason;

/// A rejected input row, not yet tagged with a batch.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Rejection {
    pub row_number: u32,
    pub city: Option<String>,
    pub region: Option<String>,
    /// The sites cell exactly as read.
    pub raw_value: Option<String>,
    pub reason: RejectionReason,
}

fn describe(reason: RejectionReason, region: Option<&str>, raw_value: Option<&str>) -> String {
    let raw = raw_value.unwrap_or("").trim();
    match reason {
        RejectionReason::MissingCity => "Missing city name".to_string(),
        RejectionReason::MissingRegion => "Missing region".to_string(),
        RejectionReason::InvalidRegion => {
            format!("Invalid region: {}", region.unwrap_or("").trim())
        }
        RejectionReason::NonNumericSites => format!("Non-numeric site count: {raw}"),
        RejectionReason::NegativeSites => format!("Negative site count: {raw}"),
        RejectionReason::OutlierSites => format!("Unrealistic site count (outlier): {raw}"),
    }
}

impl Rejection {
    /// Tag the rejection with the batch that saw it.
    #[must_use]
    pub fn into_record(self, batch_id: &str, created_at: DateTime<Utc>) -> InvalidRecord {
        InvalidRecord {
            batch_id: batch_id.to_string(),
            row_number: self.row_number,
            city: self.city,
            region: self.region,
            raw_value: self.raw_value,
            reason: self.reason,
            created_at,
        }
    }
}

/// A rejected row retained for audit. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct InvalidRecord {
    pub batch_id: String,
    pub row_number: u32,
    pub city: Option<String>,
    pub region: Option<String>,
    pub raw_value: Option<String>,
    pub reason: RejectionReason,
    pub created_at: DateTime<Utc>,
}

impl InvalidRecord {
    /// Human-readable description of why the row was rejected.
    #[must_use]
    pub fn describe(&self) -> String {
        describe(self.reason, self.region.as_deref(), self.raw_value.as_deref())
    }
}

/// An invalid record as shown to users: the stored fields plus its message.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct InvalidRow {
    #[serde(flatten)]
    pub record: InvalidRecord,
    pub message: String,
}

impl From<InvalidRecord> for InvalidRow {
    fn from(record: InvalidRecord) -> Self {
        Self {
            message: record.describe(),
            record,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejection(reason: RejectionReason, raw: Option<&str>) -> Rejection {
        Rejection {
            row_number: 4,
            city: Some("Tamale".into()),
            region: Some("Northern".into()),
            raw_value: raw.map(String::from),
            reason,
        }
    }

    #[test]
    fn describe_includes_offending_value() {
        assert_eq!(
            rejection(RejectionReason::NonNumericSites, Some("abc"))
                .into_record("b-1", Utc::now())
                .describe(),
            "Non-numeric site count: abc"
        );
        assert_eq!(
            rejection(RejectionReason::NegativeSites, Some("-3"))
                .into_record("b-1", Utc::now())
                .describe(),
            "Negative site count: -3"
        );
        assert_eq!(
            rejection(RejectionReason::OutlierSites, Some("501"))
                .into_record("b-1", Utc::now())
                .describe(),
            "Unrealistic site count (outlier): 501"
        );
        assert_eq!(
            rejection(RejectionReason::InvalidRegion, Some("5"))
                .into_record("b-1", Utc::now())
                .describe(),
            "Invalid region: Northern"
        );
    }

    #[test]
    fn invalid_row_serializes_message_beside_reason() {
        let record = rejection(RejectionReason::NonNumericSites, Some(" abc "))
            .into_record("b-1", Utc::now());
        let row = InvalidRow::from(record);
        assert_eq!(row.message, "Non-numeric site count: abc");

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["reason"], "non_numeric_sites");
        assert_eq!(json["message"], "Non-numeric site count: abc");
        assert_eq!(json["raw_value"], " abc ");
        assert_eq!(json["batch_id"], "b-1");
    }

    #[test]
    fn into_record_keeps_row_data() {
        let now = Utc::now();
        let record = rejection(RejectionReason::MissingCity, Some("5")).into_record("b-1", now);
        assert_eq!(record.batch_id, "b-1");
        assert_eq!(record.row_number, 4);
        assert_eq!(record.raw_value.as_deref(), Some("5"));
        assert_eq!(record.reason, RejectionReason::MissingCity);
        assert_eq!(record.created_at, now);
    }
}
