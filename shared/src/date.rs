//! Timestamp helpers.
//!
//! The API is not consistent about its timestamp encoding: stored documents
//! come back as ISO-8601 (`2025-10-14T10:00:00+00:00`), while datetimes that
//! pass through the default JSON encoder arrive as RFC 2822
//! (`Tue, 14 Oct 2025 10:00:00 GMT`). Both are accepted, as is a naive ISO
//! string, which is read as UTC.

use chrono::{DateTime, NaiveDateTime, Utc};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses a server timestamp. Returns `None` when no known format matches.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// `2025-10-14 10:00:00 UTC`, or the raw string if it cannot be parsed.
pub fn format_display(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// `HH:MM` label for chart axes.
pub fn format_clock(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|dt| dt.format("%H:%M").to_string())
        .unwrap_or_else(|| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_iso_with_offset() {
        let dt = parse_timestamp("2025-10-14T12:30:00+02:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2025, 10, 14, 10, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_http_date() {
        let dt = parse_timestamp("Tue, 14 Oct 2025 10:00:00 GMT").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2025, 10, 14, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_naive_as_utc() {
        let dt = parse_timestamp("2025-10-14T10:00:00.250").unwrap();
        assert_eq!(dt.timestamp_millis() % 1000, 250);
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_format_falls_back_to_raw() {
        assert_eq!(format_display("not a date"), "not a date");
        assert_eq!(format_clock("2025-10-14T08:05:00Z"), "08:05");
    }
}
