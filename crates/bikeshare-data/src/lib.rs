//! Data layer for the bikeshare explorer.
//!
//! Loads a city's trip CSV, filters it by month and day of week, and computes
//! the time, station, duration and user statistics shown in the report.

pub mod aggregator;
pub mod analysis;
pub mod filter;
pub mod reader;

pub use bikeshare_core as core;
