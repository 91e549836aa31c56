//! Season resolver

use chrono::{Datelike, Local, NaiveDate};

use crate::models::Season;

/// Resolve the agricultural season for a date.
///
/// Only the calendar month is used. `latitude` is accepted so callers can pass
/// location context, but it does not currently shift season boundaries.
pub fn resolve_season<D: Datelike>(date: &D, _latitude: f64) -> Season {
    match date.month() {
        6..=10 => Season::Kharif,
        11 | 12 | 1 | 2 | 3 => Season::Rabi,
        _ => Season::Zaid,
    }
}

/// Today's date in the machine's local time zone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
