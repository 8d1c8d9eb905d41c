use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the bikeshare explorer.
#[derive(Error, Debug)]
pub enum BikeshareError {
    /// An interactive answer was not one of the allowed values.
    #[error("Sorry. There is no data for {0} available now. Please try again.")]
    InvalidChoice(String),

    /// A city data file could not be opened.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A CSV header or row could not be parsed.
    #[error("Failed to parse CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A timestamp string did not match any recognised format.
    #[error("Invalid timestamp format: {0}")]
    TimestampParse(String),

    /// The selected month/day combination left no trips to summarise.
    #[error("No trips match this filter.")]
    NoMatchingTrips,

    /// Standard input was closed while a prompt was waiting for an answer.
    #[error("Input closed before an answer was given")]
    InputClosed,

    /// The configured data directory does not exist.
    #[error("Data path not found: {0}")]
    DataPathNotFound(PathBuf),

    /// Pass-through for console I/O errors that do not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the bikeshare crates.
pub type Result<T> = std::result::Result<T, BikeshareError>;
