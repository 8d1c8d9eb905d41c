//! City CSV loading.
//!
//! Reads one city's trip file into [`Trip`] records, keeping only the
//! whitelisted columns, then applies the month/day filter of a
//! [`Selection`].

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use bikeshare_core::error::{BikeshareError, Result};
use bikeshare_core::models::{City, Selection, Trip};
use tracing::{debug, info};

use crate::filter::filter_trips;

// ── Public API ────────────────────────────────────────────────────────────────

/// Path of `city`'s trip file inside `data_dir`.
pub fn city_path(data_dir: &Path, city: City) -> PathBuf {
    data_dir.join(city.file_name())
}

/// Read every trip in the CSV file at `path`.
///
/// The header row must name at least Start Time, End Time, Trip Duration,
/// Start Station and End Station; other whitelisted columns are optional and
/// any remaining columns are ignored. Each trip's `row` is its zero-based
/// position in the file.
pub fn load_trips(path: &Path) -> Result<Vec<Trip>> {
    let file = File::open(path).map_err(|source| BikeshareError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(file));

    let mut trips = Vec::new();
    for (row, record) in reader.deserialize::<Trip>().enumerate() {
        let mut trip = record.map_err(|source| BikeshareError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        trip.row = row;
        trips.push(trip);
    }

    debug!("Loaded {} trips from {}", trips.len(), path.display());
    Ok(trips)
}

/// Load the selected city's trips and apply its month/day filter.
///
/// The full table is read fresh on every call; nothing is cached between
/// calls.
pub fn load_data(data_dir: &Path, selection: &Selection) -> Result<Vec<Trip>> {
    let path = city_path(data_dir, selection.city);
    let trips = load_trips(&path)?;
    let filtered = filter_trips(&trips, selection.month, selection.day);

    info!(
        "Selection {}: {} of {} trips kept",
        selection,
        filtered.len(),
        trips.len()
    );

    Ok(filtered)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
