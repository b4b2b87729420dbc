//! Server date handling.
//!
//! Dates come back as free-form strings (`"2025-09-02"`,
//! `"2025-09-02 10:30:00"`, full RFC 3339). Lists such as homework and
//! absences are shown newest first.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parses the date formats the platform emits into a comparable timestamp.
pub fn parse_server_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Sorts newest first by the date `key` returns. Undated items go last and
/// keep their relative order.
pub fn sort_newest_first<T, F>(items: &mut [T], key: F)
where
    F: Fn(&T) -> Option<&str>,
{
    items.sort_by_cached_key(|item| std::cmp::Reverse(key(item).and_then(parse_server_date)));
}
