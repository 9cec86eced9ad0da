use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse the date forms accepted in query parameters and date-typed answers.
///
/// Accepts RFC 3339 timestamps, `YYYY`, `YYYY-MM` and `YYYY-MM-DD` (start of
/// the period, UTC) and `YYYY-MM-DDTHH:MM[:SS[.fff]]` without an offset (read
/// as UTC).
pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }

    let date = match s.len() {
        4 if s.bytes().all(|b| b.is_ascii_digit()) => {
            NaiveDate::from_ymd_opt(s.parse().ok()?, 1, 1)
        }
        7 if s.as_bytes()[4] == b'-' => {
            NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d").ok()
        }
        _ => NaiveDate::parse_from_str(s, "%Y-%m-%d").ok(),
    }?;

    date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc())
}

/// Interpret a number as milliseconds since the Unix epoch.
pub fn from_epoch_millis(ms: f64) -> Option<DateTime<Utc>> {
    if !ms.is_finite() {
        return None;
    }
    Utc.timestamp_millis_opt(ms.trunc() as i64).single()
}

/// Format the way the forms API expects date filters: `2024-01-31T00:00:00.000Z`.
pub fn to_api_string(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}
