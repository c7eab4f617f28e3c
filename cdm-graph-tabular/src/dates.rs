//! Permissive date parsing.
//!
//! Incoming records carry dates in whatever format the upstream source
//! exported. Cleaning needs a best-effort parse that never aborts the batch:
//! a recognized format yields the exact calendar instant, anything else is
//! the caller's cue to null the value.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Datetime formats tried in order, most specific first.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
    "%d-%m-%Y %H:%M:%S",
];

/// Date-only formats tried in order; month-first before day-first, matching
/// the upstream source's inference default.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d %b %Y",
    "%d %B %Y",
];

/// Parse a calendar date/time value using permissive format inference.
///
/// Returns `None` for unrecognized input rather than an error. Date-only
/// input resolves to midnight.
pub fn parse_date_permissive(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    // RFC 3339 (timezone-carrying) first; the offset is normalized to UTC.
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    None
}
