//! Frequency primitives: mode, value counts and the tagged field dispatch
//! used by the statistics in [`crate::analysis`].

use std::collections::BTreeMap;
use std::fmt;

use bikeshare_core::error::{BikeshareError, Result};
use bikeshare_core::models::Trip;
use chrono::{Datelike, NaiveDateTime, Timelike};

// ── Field tags ────────────────────────────────────────────────────────────────

/// Calendar component extracted from a trip's start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeComponent {
    /// 1-based calendar month.
    Month,
    /// Weekday counted from Monday = 0.
    Weekday,
    /// Hour of day, 0-23.
    Hour,
}

impl TimeComponent {
    pub fn extract(self, dt: &NaiveDateTime) -> u32 {
        match self {
            TimeComponent::Month => dt.month(),
            TimeComponent::Weekday => dt.weekday().num_days_from_monday(),
            TimeComponent::Hour => dt.hour(),
        }
    }
}

/// A column that a mode can be taken over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    StartTime(TimeComponent),
    StartStation,
    EndStation,
    BirthYear,
}

/// A value read out of a [`Field`]. Ordering is numeric for numbers and
/// lexicographic for text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldValue<'a> {
    Number(i64),
    Text(&'a str),
}

impl<'a> FieldValue<'a> {
    pub fn as_number(&self) -> Option<i64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&'a str> {
        match self {
            FieldValue::Text(s) => Some(*s),
            FieldValue::Number(_) => None,
        }
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

impl Field {
    /// The trip's value for this field; `None` when the trip has no value.
    pub fn value<'a>(&self, trip: &'a Trip) -> Option<FieldValue<'a>> {
        match self {
            Field::StartTime(component) => Some(FieldValue::Number(i64::from(
                component.extract(&trip.start_time),
            ))),
            Field::StartStation => Some(FieldValue::Text(&trip.start_station)),
            Field::EndStation => Some(FieldValue::Text(&trip.end_station)),
            Field::BirthYear => trip.birth_year.map(|y| FieldValue::Number(i64::from(y))),
        }
    }
}

// ── Frequency helpers ─────────────────────────────────────────────────────────

fn tally<T: Ord>(values: impl IntoIterator<Item = T>) -> BTreeMap<T, usize> {
    let mut counts = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }
    counts
}

/// Most frequent value and its count. Ties go to the smallest value.
pub fn mode_with_count<T: Ord>(values: impl IntoIterator<Item = T>) -> Option<(T, usize)> {
    let mut best: Option<(T, usize)> = None;
    // Ascending order plus a strict comparison keeps the smallest tied value.
    for (value, count) in tally(values) {
        if best.as_ref().map_or(true, |(_, top)| count > *top) {
            best = Some((value, count));
        }
    }
    best
}

/// Most frequent value. Ties go to the smallest value; `None` when empty.
///
/// ```
/// use bikeshare_data::aggregator::mode;
///
/// assert_eq!(mode([3, 1, 3, 2]), Some(3));
/// assert_eq!(mode([5, 4, 6]), Some(4));
/// assert_eq!(mode(Vec::<u32>::new()), None);
/// ```
pub fn mode<T: Ord>(values: impl IntoIterator<Item = T>) -> Option<T> {
    mode_with_count(values).map(|(value, _)| value)
}

/// Count of each distinct value, most frequent first; equal counts are
/// ordered by value.
pub fn value_counts<T: Ord>(values: impl IntoIterator<Item = T>) -> Vec<(T, usize)> {
    let mut counts: Vec<(T, usize)> = tally(values).into_iter().collect();
    // Stable sort keeps the ascending key order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Mode of `field` over `trips`, skipping trips with no value.
///
/// Returns [`BikeshareError::NoMatchingTrips`] when no trip has a value.
pub fn calculate_mode(trips: &[Trip], field: Field) -> Result<FieldValue<'_>> {
    mode(trips.iter().filter_map(|t| field.value(t))).ok_or(BikeshareError::NoMatchingTrips)
}

/// Most frequent `(start, end)` station pair and how often it occurs.
///
/// Ties go to the lexicographically first pair.
pub fn most_common_trip(trips: &[Trip]) -> Option<((&str, &str), usize)> {
    mode_with_count(
        trips
            .iter()
            .map(|t| (t.start_station.as_str(), t.end_station.as_str())),
    )
}

// ── Tests ─────────────────────────────────────────────────────────────────────
