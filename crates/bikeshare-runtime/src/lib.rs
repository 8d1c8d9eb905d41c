//! Runtime layer for the bikeshare explorer.
//!
//! Drives the interactive loop on top of the data and UI layers: collect a
//! selection, load and filter trips, print statistics, page raw rows, then
//! offer a restart.

pub mod prompt;
pub mod session;

pub use bikeshare_core as core;
pub use bikeshare_data as data;
pub use bikeshare_ui as ui;
