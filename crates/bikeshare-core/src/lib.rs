//! Shared building blocks for the bikeshare explorer.
//!
//! Holds the trip data model and fixed lookup tables, the error type,
//! command-line settings, timestamp helpers and text formatting used by the
//! data, UI and runtime crates.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod time_utils;
