//! The four statistics blocks computed for a filtered trip table.
//!
//! Each routine is read-only, records how long it took, and refuses an empty
//! table with [`BikeshareError::NoMatchingTrips`].

use std::time::{Duration, Instant};

use bikeshare_core::error::{BikeshareError, Result};
use bikeshare_core::models::{City, Trip};
use tracing::debug;

use crate::aggregator::{calculate_mode, most_common_trip, value_counts, Field, TimeComponent};

// ── Public types ──────────────────────────────────────────────────────────────

/// Most frequent times of travel.
#[derive(Debug, Clone)]
pub struct TimeStats {
    /// 1-based calendar month.
    pub month: u32,
    /// Weekday counted from Monday = 0.
    pub weekday: u32,
    /// Start hour, 0-23.
    pub hour: u32,
    pub elapsed: Duration,
}

/// Most popular stations and start/end combination.
#[derive(Debug, Clone)]
pub struct StationStats {
    pub start_station: String,
    pub end_station: String,
    pub trip: (String, String),
    /// Number of trips between the pair in `trip`.
    pub trip_count: usize,
    pub elapsed: Duration,
}

/// Total and mean trip duration, in seconds.
#[derive(Debug, Clone)]
pub struct DurationStats {
    pub total_secs: f64,
    pub mean_secs: f64,
    pub trip_count: usize,
    pub elapsed: Duration,
}

/// Earliest, most recent and most common rider birth year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub most_recent: i32,
    pub most_common: i32,
}

/// Gender and birth-year figures for cities that record them.
#[derive(Debug, Clone)]
pub struct Demographics {
    pub genders: Vec<(String, usize)>,
    /// `None` when no trip in the table has a birth year.
    pub birth_years: Option<BirthYearStats>,
}

/// Rider breakdown.
#[derive(Debug, Clone)]
pub struct UserStats {
    pub user_types: Vec<(String, usize)>,
    /// `None` for cities without gender / birth-year columns.
    pub demographics: Option<Demographics>,
    pub elapsed: Duration,
}

/// All four statistics blocks for one selection.
#[derive(Debug, Clone)]
pub struct TripReport {
    pub time: TimeStats,
    pub stations: StationStats,
    pub durations: DurationStats,
    pub users: UserStats,
}

// ── Statistics ────────────────────────────────────────────────────────────────

fn ensure_not_empty(trips: &[Trip]) -> Result<()> {
    if trips.is_empty() {
        return Err(BikeshareError::NoMatchingTrips);
    }
    Ok(())
}

fn number_mode(trips: &[Trip], field: Field) -> Result<i64> {
    calculate_mode(trips, field)?
        .as_number()
        .ok_or(BikeshareError::NoMatchingTrips)
}

fn text_mode(trips: &[Trip], field: Field) -> Result<String> {
    calculate_mode(trips, field)?
        .as_text()
        .map(str::to_string)
        .ok_or(BikeshareError::NoMatchingTrips)
}

/// Most common month, weekday and start hour.
pub fn time_stats(trips: &[Trip]) -> Result<TimeStats> {
    let started = Instant::now();
    ensure_not_empty(trips)?;

    let component = |c| number_mode(trips, Field::StartTime(c)).map(|n| n as u32);

    Ok(TimeStats {
        month: component(TimeComponent::Month)?,
        weekday: component(TimeComponent::Weekday)?,
        hour: component(TimeComponent::Hour)?,
        elapsed: started.elapsed(),
    })
}

/// Most common start station, end station and start/end pair.
pub fn station_stats(trips: &[Trip]) -> Result<StationStats> {
    let started = Instant::now();
    ensure_not_empty(trips)?;

    let start_station = text_mode(trips, Field::StartStation)?;
    let end_station = text_mode(trips, Field::EndStation)?;
    let ((from, to), trip_count) =
        most_common_trip(trips).ok_or(BikeshareError::NoMatchingTrips)?;

    Ok(StationStats {
        start_station,
        end_station,
        trip: (from.to_string(), to.to_string()),
        trip_count,
        elapsed: started.elapsed(),
    })
}

/// Sum and arithmetic mean of trip durations.
pub fn duration_stats(trips: &[Trip]) -> Result<DurationStats> {
    let started = Instant::now();
    ensure_not_empty(trips)?;

    let total_secs: f64 = trips.iter().map(|t| t.duration_secs).sum();
    Ok(DurationStats {
        total_secs,
        mean_secs: total_secs / trips.len() as f64,
        trip_count: trips.len(),
        elapsed: started.elapsed(),
    })
}

/// User-type counts, plus gender counts and birth-year figures when `city`
/// records them.
pub fn user_stats(trips: &[Trip], city: City) -> Result<UserStats> {
    let started = Instant::now();
    ensure_not_empty(trips)?;

    let user_types = owned_counts(trips.iter().filter_map(|t| t.user_type.as_deref()));

    let demographics = if city.has_demographics() {
        let genders = owned_counts(trips.iter().filter_map(|t| t.gender.as_deref()));
        Some(Demographics {
            genders,
            birth_years: birth_year_stats(trips)?,
        })
    } else {
        None
    };

    Ok(UserStats {
        user_types,
        demographics,
        elapsed: started.elapsed(),
    })
}

fn owned_counts<'a>(values: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    value_counts(values)
        .into_iter()
        .map(|(value, count)| (value.to_string(), count))
        .collect()
}

fn birth_year_stats(trips: &[Trip]) -> Result<Option<BirthYearStats>> {
    let years = || trips.iter().filter_map(|t| t.birth_year);
    let (Some(earliest), Some(most_recent)) = (years().min(), years().max()) else {
        return Ok(None);
    };
    let most_common = number_mode(trips, Field::BirthYear)? as i32;
    Ok(Some(BirthYearStats {
        earliest,
        most_recent,
        most_common,
    }))
}

/// Run all four statistics blocks over `trips`.
pub fn analyze_trips(trips: &[Trip], city: City) -> Result<TripReport> {
    let report = TripReport {
        time: time_stats(trips)?,
        stations: station_stats(trips)?,
        durations: duration_stats(trips)?,
        users: user_stats(trips, city)?,
    };
    debug!("Analysed {} trips for {}", trips.len(), city);
    Ok(report)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use bikeshare_core::time_utils::parse_timestamp;

    fn trip(
        start: &str,
        from: &str,
        to: &str,
        duration: f64,
        user_type: &str,
        gender: Option<&str>,
        birth_year: Option<i32>,
    ) -> Trip {
        let start_time = parse_timestamp(start).unwrap();
        Trip {
            row: 0,
            start_time,
            end_time: start_time,
            duration_secs: duration,
            start_station: from.to_string(),
            end_station: to.to_string(),
            user_type: Some(user_type.to_string()),
            gender: gender.map(str::to_string),
            birth_year,
        }
    }

    fn sample() -> Vec<Trip> {
        vec![
            // Friday
            trip("2017-06-23 17:09:32", "Clinton St", "Canal St", 300.0, "Subscriber", Some("Male"), Some(1989)),
            // Friday
            trip("2017-06-30 17:40:05", "Clinton St", "Canal St", 900.0, "Subscriber", Some("Female"), Some(1989)),
            // Monday
            trip("2017-05-01 08:00:00", "Streeter Dr", "Lake Shore Dr", 1200.0, "Customer", None, None),
            // Tuesday
            trip("2017-06-06 17:15:00", "Adams St", "Canal St", 600.0, "Subscriber", Some("Male"), Some(1975)),
        ]
    }

    #[test]
    fn test_time_stats() {
        let stats = time_stats(&sample()).unwrap();
        assert_eq!(stats.month, 6);
        assert_eq!(stats.weekday, 4);
        assert_eq!(stats.hour, 17);
    }

    #[test]
    fn test_station_stats() {
        let stats = station_stats(&sample()).unwrap();
        assert_eq!(stats.start_station, "Clinton St");
        assert_eq!(stats.end_station, "Canal St");
        assert_eq!(
            stats.trip,
            ("Clinton St".to_string(), "Canal St".to_string())
        );
        assert_eq!(stats.trip_count, 2);
    }

    #[test]
    fn test_duration_stats() {
        let stats = duration_stats(&sample()).unwrap();
        assert_eq!(stats.total_secs, 3000.0);
        assert_eq!(stats.mean_secs, 750.0);
        assert_eq!(stats.trip_count, 4);
    }

    #[test]
    fn test_user_stats_with_demographics() {
        let stats = user_stats(&sample(), City::Chicago).unwrap();
        assert_eq!(
            stats.user_types,
            vec![("Subscriber".to_string(), 3), ("Customer".to_string(), 1)]
        );

        let demo = stats.demographics.expect("chicago has demographics");
        assert_eq!(
            demo.genders,
            vec![("Male".to_string(), 2), ("Female".to_string(), 1)]
        );
        assert_eq!(
            demo.birth_years,
            Some(BirthYearStats {
                earliest: 1975,
                most_recent: 1989,
                most_common: 1989,
            })
        );
    }

    #[test]
    fn test_user_stats_washington_skips_demographics() {
        let stats = user_stats(&sample(), City::Washington).unwrap();
        assert!(stats.demographics.is_none());
        assert_eq!(stats.user_types.len(), 2);
    }

    #[test]
    fn test_user_stats_without_any_birth_year() {
        let trips = vec![trip("2017-01-01 10:00:00", "A", "B", 60.0, "Customer", None, None)];
        let stats = user_stats(&trips, City::NewYorkCity).unwrap();
        let demo = stats.demographics.unwrap();
        assert!(demo.genders.is_empty());
        assert_eq!(demo.birth_years, None);
    }

    #[test]
    fn test_empty_table_is_no_matching_trips() {
        assert!(matches!(time_stats(&[]), Err(BikeshareError::NoMatchingTrips)));
        assert!(matches!(station_stats(&[]), Err(BikeshareError::NoMatchingTrips)));
        assert!(matches!(duration_stats(&[]), Err(BikeshareError::NoMatchingTrips)));
        assert!(matches!(
            user_stats(&[], City::Chicago),
            Err(BikeshareError::NoMatchingTrips)
        ));
        assert!(analyze_trips(&[], City::Chicago).is_err());
    }

    #[test]
    fn test_analyze_trips_collects_all_blocks() {
        let report = analyze_trips(&sample(), City::Chicago).unwrap();
        assert_eq!(report.time.hour, 17);
        assert_eq!(report.stations.trip_count, 2);
        assert_eq!(report.durations.total_secs, 3000.0);
        assert!(report.users.demographics.is_some());
    }
}
