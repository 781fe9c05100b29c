//! Conversion of database timestamps into local calendar time.
//!
//! `ZDATE` holds seconds (possibly fractional or negative) since
//! [`custom_epoch`](crate::constants::custom_epoch). Localization happens once,
//! here, so every consumer sees the same wall-clock date.

use chrono::{DateTime, Duration, FixedOffset, SecondsFormat, Timelike};

use crate::constants::{custom_epoch, TARGET_TIMEZONE};

/// Convert seconds since the custom epoch into a localized timestamp
///
/// Precision is kept to the microsecond. Returns None when the value cannot be
/// represented as a calendar date (NaN, infinite, or far outside chrono's range).
pub fn localize(raw_seconds: f64) -> Option<DateTime<FixedOffset>> {
    if !raw_seconds.is_finite() {
        return None;
    }

    let micros = (raw_seconds * 1_000_000.0).round();
    if micros.abs() >= i64::MAX as f64 {
        return None;
    }

    let utc = custom_epoch().checked_add_signed(Duration::microseconds(micros as i64))?;
    Some(utc.with_timezone(&TARGET_TIMEZONE).fixed_offset())
}

/// ISO-8601 rendering with UTC offset, e.g. `2000-12-30T19:00:00-05:00`
///
/// Sub-second values are written with six digits (`19:00:00.500000`).
pub fn to_iso8601(timestamp: &DateTime<FixedOffset>) -> String {
    let format = if timestamp.nanosecond() == 0 {
        SecondsFormat::Secs
    } else {
        SecondsFormat::Micros
    };
    timestamp.to_rfc3339_opts(format, false)
}

/// Convenience wrapper: localize and render in one step
pub fn convert(raw_seconds: f64) -> Option<String> {
    localize(raw_seconds).map(|ts| to_iso8601(&ts))
}

/// Calendar date (YYYY-MM-DD) of a localized timestamp
pub fn local_date(timestamp: &DateTime<FixedOffset>) -> String {
    timestamp.format("%Y-%m-%d").to_string()
}
