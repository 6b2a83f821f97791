//! Row-to-entity parsing helpers.
//!
//! Every repo converts `libsql::Row` (column-indexed) into typed entity
//! structs. These helpers isolate the parsing and the integer-width
//! conversions between Rust's unsigned counts and `SQLite`'s `INTEGER`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::DatabaseError;

/// Render a timestamp for storage: RFC 3339, UTC, microsecond precision.
///
/// Fixed width, so lexicographic order of the stored text is time order.
#[must_use]
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 (`"2026-02-09T14:30:00.000000Z"`) and `SQLite`'s
/// default format (`"2026-02-09 14:30:00"`).
///
/// # Errors
///
/// Returns `DatabaseError::Corrupt` if the string matches neither format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Corrupt(format!("Failed to parse datetime '{s}': {e}")))
}

/// Parse a TEXT column into a serde-deserializable enum.
///
/// Works for `Region` (canonical names) and `RejectionReason` (`snake_case`).
///
/// # Errors
///
/// Returns `DatabaseError::Corrupt` if the string does not match any variant.
pub fn parse_enum<T: DeserializeOwned>(s: &str) -> Result<T, DatabaseError> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|e| DatabaseError::Corrupt(format!("Failed to parse enum from '{s}': {e}")))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Read an INTEGER column that must fit in `u32`.
///
/// # Errors
///
/// Returns `DatabaseError::Corrupt` for negative or oversized values.
pub fn get_u32(row: &libsql::Row, idx: i32) -> Result<u32, DatabaseError> {
    let value = row.get::<i64>(idx)?;
    u32::try_from(value)
        .map_err(|_| DatabaseError::Corrupt(format!("column {idx}: {value} is not a valid u32")))
}

/// Read an INTEGER column that must be non-negative.
///
/// # Errors
///
/// Returns `DatabaseError::Corrupt` for negative values.
pub fn get_u64(row: &libsql::Row, idx: i32) -> Result<u64, DatabaseError> {
    let value = row.get::<i64>(idx)?;
    u64::try_from(value)
        .map_err(|_| DatabaseError::Corrupt(format!("column {idx}: {value} is negative")))
}

/// Convert an unsigned count to `SQLite`'s signed INTEGER.
///
/// # Errors
///
/// Returns `DatabaseError::Corrupt` if the value exceeds `i64::MAX`.
pub fn to_sql_int(value: u64, field: &str) -> Result<i64, DatabaseError> {
    i64::try_from(value)
        .map_err(|_| DatabaseError::Corrupt(format!("{field} = {value} does not fit in INTEGER")))
}

/// Serialize a value into a JSON TEXT column.
///
/// # Errors
///
/// Returns `DatabaseError::Other` if serialization fails.
pub fn to_json_text<T: Serialize>(value: &T) -> Result<String, DatabaseError> {
    serde_json::to_string(value).map_err(|e| DatabaseError::Other(e.into()))
}

/// Deserialize a JSON TEXT column.
///
/// # Errors
///
/// Returns `DatabaseError::Corrupt` if the text is not valid JSON for `T`.
pub fn parse_json<T: DeserializeOwned>(s: &str) -> Result<T, DatabaseError> {
    serde_json::from_str(s)
        .map_err(|e| DatabaseError::Corrupt(format!("Invalid JSON in column: {e}")))
}

#[cfg(test)]
mod tests {
    use chrono::SubsecRound;
    use galamsay_core::enums::{Region, RejectionReason};

    use super::*;

    #[test]
    fn datetime_round_trips_at_micro_precision() {
        let now = Utc::now().trunc_subsecs(6);
        let text = format_datetime(&now);
        assert!(text.ends_with('Z'), "{text}");
        assert_eq!(parse_datetime(&text).unwrap(), now);
    }

    #[test]
    fn parses_sqlite_default_format() {
        let dt = parse_datetime("2026-02-09 14:30:00").unwrap();
        assert_eq!(format_datetime(&dt), "2026-02-09T14:30:00.000000Z");
    }

    #[test]
    fn garbage_datetime_is_corrupt() {
        assert!(matches!(
            parse_datetime("yesterday"),
            Err(DatabaseError::Corrupt(_))
        ));
    }

    #[test]
    fn enums_parse_from_storage_form() {
        assert_eq!(
            parse_enum::<Region>("Greater Accra").unwrap(),
            Region::GreaterAccra
        );
        assert_eq!(
            parse_enum::<RejectionReason>("outlier_sites").unwrap(),
            RejectionReason::OutlierSites
        );
        assert!(parse_enum::<Region>("Lagos").is_err());
    }

    #[test]
    fn json_text_round_trips() {
        let cities = vec!["Kumasi".to_string(), "Tarkwa".to_string()];
        let text = to_json_text(&cities).unwrap();
        assert_eq!(text, r#"["Kumasi","Tarkwa"]"#);
        assert_eq!(parse_json::<Vec<String>>(&text).unwrap(), cities);
    }

    #[test]
    fn oversized_counts_are_refused() {
        assert!(to_sql_int(u64::MAX, "total_sites").is_err());
        assert_eq!(to_sql_int(35, "total_sites").unwrap(), 35);
    }
}
