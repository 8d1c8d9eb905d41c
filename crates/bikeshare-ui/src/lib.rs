//! Console layer for the bikeshare explorer.
//!
//! Provides the prompt/answer [`console::Console`], plain-text rendering of
//! the statistics report, and paged display of raw trip rows.

pub mod console;
pub mod raw_view;
pub mod report;

pub use bikeshare_core as core;
