//! Timestamp parsing for raw ad payloads.
//!
//! Deployments report campaign dates as epoch seconds, epoch milliseconds,
//! or one of a few ISO-8601 string shapes, without flagging which. Everything
//! funnels into a single epoch-millisecond representation here.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

/// Boundary between second- and millisecond-epoch interpretations.
///
/// Any integer below this is taken as seconds (10^11 seconds is past the
/// year 5100, so no plausible second-epoch date exceeds it); anything at or
/// above it is already milliseconds.
const EPOCH_MS_THRESHOLD: i64 = 100_000_000_000;

/// Parses a raw timestamp value into epoch milliseconds.
///
/// Accepts epoch seconds or milliseconds (numeric or digit-string) and
/// ISO-8601 strings with an explicit offset, without one (assumed UTC), or
/// as a bare date (midnight UTC). Returns `None` for `null`, empty or
/// unparseable strings, and any other JSON type. Never errors.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn parse_timestamp_ms(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => {
            let ivalue = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
            Some(seconds_or_millis(ivalue))
        }
        Value::String(s) => parse_timestamp_str(s),
        _ => None,
    }
}

/// Applies the [`EPOCH_MS_THRESHOLD`] heuristic: seconds are scaled to
/// milliseconds, millisecond values pass through.
fn seconds_or_millis(ivalue: i64) -> i64 {
    if ivalue < EPOCH_MS_THRESHOLD {
        ivalue.saturating_mul(1000)
    } else {
        ivalue
    }
}

fn parse_timestamp_str(s: &str) -> Option<i64> {
    let stripped = s.trim();
    if stripped.is_empty() {
        return None;
    }

    // Digit-only strings are epoch values, not dates.
    if stripped.bytes().all(|b| b.is_ascii_digit()) {
        return stripped.parse::<i64>().ok().map(seconds_or_millis);
    }

    // RFC 3339 covers `Z` and colon-separated offsets; the explicit pattern
    // afterwards covers the bare `±HHMM` offsets RFC 3339 rejects.
    if let Ok(dt) = DateTime::parse_from_rfc3339(stripped) {
        return Some(dt.timestamp_millis());
    }
    if let Ok(dt) = DateTime::parse_from_str(stripped, "%Y-%m-%dT%H:%M:%S%z") {
        return Some(dt.timestamp_millis());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(stripped, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc().timestamp_millis());
    }
    if let Ok(date) = NaiveDate::parse_from_str(stripped, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis());
    }

    tracing::debug!(value = stripped, "unable to parse timestamp");
    None
}
