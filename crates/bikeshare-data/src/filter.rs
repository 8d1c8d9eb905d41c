//! Month / day-of-week filtering of a loaded trip table.

use bikeshare_core::models::Trip;
use chrono::{Datelike, Month, Weekday};

/// Returns `true` when `trip` started in `month` (if given) and on `day`
/// (if given). `None` matches everything.
pub fn matches(trip: &Trip, month: Option<Month>, day: Option<Weekday>) -> bool {
    let month_ok = month.map_or(true, |m| trip.start_time.month() == m.number_from_month());
    let day_ok = day.map_or(true, |d| {
        trip.start_time.weekday().num_days_from_monday() == d.num_days_from_monday()
    });
    month_ok && day_ok
}

/// Build a new table holding the trips that pass [`matches`], in their
/// original order. `trips` itself is left untouched.
pub fn filter_trips(trips: &[Trip], month: Option<Month>, day: Option<Weekday>) -> Vec<Trip> {
    if month.is_none() && day.is_none() {
        return trips.to_vec();
    }
    trips
        .iter()
        .filter(|t| matches(t, month, day))
        .cloned()
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
