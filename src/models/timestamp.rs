//! Timestamps as stored in the CSV files.
//!
//! Cells are kept as the exact text found on disk so that any ISO 8601
//! variant survives a load/save cycle untouched. Values written by this
//! service are RFC 3339, UTC, millisecond precision, `Z` suffix.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(String);

impl Timestamp {
    pub fn now() -> Self {
        Self::from_datetime(&Utc::now())
    }

    pub fn from_datetime(ts: &DateTime<Utc>) -> Self {
        Self(ts.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Best-effort interpretation of the stored text. `None` means the cell
    /// holds something that is not a recognised ISO 8601 form; the text
    /// itself is still kept.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        parse_lenient(&self.0)
    }
}

impl From<String> for Timestamp {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// RFC 3339 first, then offset-less date-times and bare dates read as UTC.
pub fn parse_lenient(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    for fmt in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_written_form_always_has_millis() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        assert_eq!(Timestamp::from_datetime(&ts).as_str(), "2024-05-01T10:00:00.000Z");
    }

    #[test]
    fn test_now_is_readable_back() {
        let ts = Timestamp::now();
        assert!(ts.as_str().ends_with('Z'));
        assert!(ts.to_datetime().is_some());
    }

    #[test]
    fn test_offsets_are_normalised_to_utc() {
        let ts = parse_lenient("2024-05-01T12:00:00.500+02:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap() + chrono::Duration::milliseconds(500));
    }

    #[test]
    fn test_iso_forms_without_offset_read_as_utc() {
        let midnight = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let ten = Utc.with_ymd_and_hms(2024, 2, 1, 10, 0, 0).unwrap();

        assert_eq!(parse_lenient("2024-02-01"), Some(midnight));
        assert_eq!(parse_lenient("2024-02-01T10:00:00"), Some(ten));
        assert_eq!(parse_lenient("2024-02-01T10:00:00.000"), Some(ten));
        assert_eq!(parse_lenient("2024-02-01 10:00:00"), Some(ten));
    }

    #[test]
    fn test_unrecognised_text_is_kept_verbatim() {
        let ts = Timestamp::from("yesterday".to_string());
        assert_eq!(ts.to_datetime(), None);
        assert_eq!(ts.to_string(), "yesterday");
    }
}
