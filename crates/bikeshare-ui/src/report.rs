//! Plain-text rendering of the statistics blocks.

use std::io::{self, Write};
use std::time::Duration;

use bikeshare_core::formatting::{format_count, format_duration, format_number, rule};
use bikeshare_core::time_utils::{month_name, weekday_name};
use bikeshare_data::analysis::{
    Demographics, DurationStats, StationStats, TimeStats, TripReport, UserStats,
};
use unicode_width::UnicodeWidthStr;

/// Printed in place of the statistics when the filter leaves no trips.
pub const NO_DATA_MESSAGE: &str = "No trips match this filter.";

fn heading(out: &mut impl Write, index: u8, title: &str) -> io::Result<()> {
    writeln!(out, "\n ({}) Calculating {}... \n", index, title)
}

fn footer(out: &mut impl Write, elapsed: Duration) -> io::Result<()> {
    writeln!(out, "This took {:.2} seconds.", elapsed.as_secs_f64())?;
    writeln!(out, "{}", rule())
}

/// `value (Name)` for a numbered calendar component.
fn named(value: u32, name: Option<&str>) -> String {
    match name {
        Some(n) => format!("{} ({})", value, n),
        None => value.to_string(),
    }
}

/// Two-column table of value counts, labels left-aligned and counts
/// right-aligned.
fn write_counts(out: &mut impl Write, counts: &[(String, usize)]) -> io::Result<()> {
    if counts.is_empty() {
        return writeln!(out, "  (none)");
    }

    let label_width = counts.iter().map(|(v, _)| v.width()).max().unwrap_or(0);
    let formatted: Vec<String> = counts.iter().map(|(_, n)| format_count(*n as u64)).collect();
    let count_width = formatted.iter().map(String::len).max().unwrap_or(0);

    for ((value, _), count) in counts.iter().zip(&formatted) {
        let pad = label_width - value.width();
        writeln!(
            out,
            "  {}{}  {:>cw$}",
            value,
            " ".repeat(pad),
            count,
            cw = count_width
        )?;
    }
    Ok(())
}

pub fn write_time_stats(out: &mut impl Write, stats: &TimeStats) -> io::Result<()> {
    heading(out, 1, "the most frequent times of travel")?;
    writeln!(
        out,
        "The most common month: {}",
        named(stats.month, month_name(stats.month))
    )?;
    writeln!(
        out,
        "The most common day of week: {}",
        named(stats.weekday, weekday_name(stats.weekday))
    )?;
    writeln!(out, "The most common start hour: {}", stats.hour)?;
    footer(out, stats.elapsed)
}

pub fn write_station_stats(out: &mut impl Write, stats: &StationStats) -> io::Result<()> {
    heading(out, 2, "the most popular stations and trip")?;
    writeln!(out, "The most commonly used start station: {}", stats.start_station)?;
    writeln!(out, "The most commonly used end station: {}", stats.end_station)?;
    let plural = if stats.trip_count == 1 { "" } else { "s" };
    writeln!(
        out,
        "The most frequent combination of start/end station: {} -> {} ({} trip{})",
        stats.trip.0,
        stats.trip.1,
        format_count(stats.trip_count as u64),
        plural
    )?;
    footer(out, stats.elapsed)
}

pub fn write_duration_stats(out: &mut impl Write, stats: &DurationStats) -> io::Result<()> {
    heading(out, 3, "trip duration")?;
    writeln!(
        out,
        "The total travel time: {} seconds ({})",
        format_number(stats.total_secs, 0),
        format_duration(stats.total_secs)
    )?;
    writeln!(
        out,
        "The mean travel time: {} seconds ({})",
        format_number(stats.mean_secs, 2),
        format_duration(stats.mean_secs)
    )?;
    footer(out, stats.elapsed)
}

fn write_demographics(out: &mut impl Write, demo: &Demographics) -> io::Result<()> {
    writeln!(out, "The counts of gender:")?;
    write_counts(out, &demo.genders)?;
    writeln!(out, "{}", rule())?;

    match &demo.birth_years {
        Some(years) => {
            writeln!(out, "The earliest year of birth: {}", years.earliest)?;
            writeln!(out, "The most recent year of birth: {}", years.most_recent)?;
            writeln!(out, "The most common year of birth: {}", years.most_common)?;
        }
        None => writeln!(out, "No birth year data for this filter.")?,
    }
    writeln!(out, "{}", rule())
}

pub fn write_user_stats(out: &mut impl Write, stats: &UserStats) -> io::Result<()> {
    heading(out, 4, "user stats")?;
    writeln!(out, "The counts of user types:")?;
    write_counts(out, &stats.user_types)?;
    writeln!(out, "{}", rule())?;

    if let Some(demo) = &stats.demographics {
        write_demographics(out, demo)?;
    }
    footer(out, stats.elapsed)
}

/// Print all four statistics blocks in order.
pub fn write_report(out: &mut impl Write, report: &TripReport) -> io::Result<()> {
    write_time_stats(out, &report.time)?;
    write_station_stats(out, &report.stations)?;
    write_duration_stats(out, &report.durations)?;
    write_user_stats(out, &report.users)
}

pub fn write_no_data(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "\n{}", NO_DATA_MESSAGE)?;
    writeln!(out, "{}", rule())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
