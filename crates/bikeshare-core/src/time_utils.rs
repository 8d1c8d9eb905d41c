use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use tracing::debug;

use crate::error::{BikeshareError, Result};

/// Layouts accepted for Start Time / End Time, tried in order.
const FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

// ── Parsing ───────────────────────────────────────────────────────────────────

/// Parse a trip timestamp into a naive (local wall-clock) date-time.
///
/// Accepts `YYYY-MM-DD HH:MM:SS` with optional fractional seconds, the same
/// with a `T` separator, RFC 3339 (the offset is dropped), US-style
/// `MM/DD/YYYY HH:MM[:SS]`, and a bare `YYYY-MM-DD` (midnight).
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(BikeshareError::TimestampParse(s.to_string()));
    }

    for fmt in FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Ok(dt);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.naive_local());
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(dt) = date.and_hms_opt(0, 0, 0) {
            return Ok(dt);
        }
    }

    debug!("could not parse timestamp string \"{}\"", s);
    Err(BikeshareError::TimestampParse(s.to_string()))
}

/// `serde` adapter so CSV columns can be read straight into [`NaiveDateTime`].
pub fn deserialize_timestamp<'de, D>(deserializer: D) -> std::result::Result<NaiveDateTime, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

/// Render a timestamp in the layout used by the city files.
pub fn format_timestamp(dt: &NaiveDateTime) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

// ── Names ─────────────────────────────────────────────────────────────────────

/// English name of a 1-based calendar month. `None` outside 1..=12.
pub fn month_name(month: u32) -> Option<&'static str> {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i as usize))
        .copied()
}

/// English name of a weekday counted from Monday = 0. `None` outside 0..=6.
pub fn weekday_name(day: u32) -> Option<&'static str> {
    WEEKDAY_NAMES.get(day as usize).copied()
}

// ── Tests ──────────────────────────────────────────────────────────────────────
