//! Paged display of raw trip rows.

use std::io::{BufRead, Write};

use bikeshare_core::error::Result;
use bikeshare_core::formatting::rule;
use bikeshare_core::models::Trip;
use tracing::debug;

use crate::console::Console;

pub const SHOW_RAW_PROMPT: &str = "Do you want to see how the raw data looks like? Enter yes or no: ";
pub const CONTINUE_PROMPT: &str = "Do you wish to continue? Enter yes or no: ";

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 5;

fn write_trip(out: &mut impl Write, trip: &Trip, with_demographics: bool) -> std::io::Result<()> {
    writeln!(out, "Index: {}", trip.row)?;
    let columns = trip.columns(with_demographics);
    let width = columns.iter().map(|(name, _)| name.len() + 1).max().unwrap_or(0);
    for (name, value) in columns {
        let label = format!("{}:", name);
        writeln!(out, "{:<width$} {}", label, value, width = width)?;
    }
    writeln!(out)?;
    writeln!(out, "{}", rule())
}

/// Offer to print `trips` one page at a time.
///
/// Nothing is printed unless the first answer is `yes`. After every full page
/// that still has rows behind it, the user is asked whether to continue; any
/// answer other than `yes` stops. Pages are cut by position in `trips`, not
/// by the rows' source numbers. Returns the number of rows printed.
pub fn page_trips<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    trips: &[Trip],
    with_demographics: bool,
    page_size: usize,
) -> Result<usize> {
    if !console.confirm(SHOW_RAW_PROMPT)? {
        return Ok(0);
    }

    let mut shown = 0;
    for (page_index, page) in trips.chunks(page_size.max(1)).enumerate() {
        if page_index > 0 && !console.confirm(CONTINUE_PROMPT)? {
            break;
        }
        for trip in page {
            write_trip(console.out(), trip, with_demographics)?;
        }
        shown += page.len();
    }

    debug!("Displayed {} of {} raw rows", shown, trips.len());
    Ok(shown)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
