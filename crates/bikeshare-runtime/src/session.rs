//! The interactive session: collect filters, load, report, offer raw rows,
//! then ask whether to go again.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use bikeshare_core::error::{BikeshareError, Result};
use bikeshare_data::analysis::analyze_trips;
use bikeshare_data::reader::load_data;
use bikeshare_ui::console::Console;
use bikeshare_ui::raw_view::{page_trips, DEFAULT_PAGE_SIZE};
use bikeshare_ui::report::{write_no_data, write_report};
use tracing::{debug, info};

use crate::prompt::{ask_restart, get_filters};

pub const FAREWELL: &str = "Thank you! This is the end of the program. \n";

/// Where the session loop is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Prompting, loading and reporting for one selection.
    CollectingFilters,
    /// Waiting for a yes/no on whether to run another cycle.
    PromptRestart,
}

/// Outcome of [`Session::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionSummary {
    /// Report cycles that ran to completion.
    pub cycles: usize,
    /// Whether the session stopped because input ran out.
    pub input_closed: bool,
}

/// Drives the prompt → load → report → restart loop.
#[derive(Debug, Clone)]
pub struct Session {
    data_dir: PathBuf,
    page_size: usize,
}

impl Session {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Run until the user declines to restart or input is exhausted.
    ///
    /// Load failures end the session with an error; an empty selection only
    /// prints a notice.
    pub fn run<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> Result<SessionSummary> {
        let mut summary = SessionSummary::default();

        match self.drive(console, &mut summary) {
            Ok(()) => {}
            Err(BikeshareError::InputClosed) => {
                info!("Input closed; ending session");
                summary.input_closed = true;
            }
            Err(err) => return Err(err),
        }

        info!("Session finished after {} cycle(s)", summary.cycles);
        Ok(summary)
    }

    fn drive<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
        summary: &mut SessionSummary,
    ) -> Result<()> {
        let mut state = SessionState::CollectingFilters;
        loop {
            debug!("Session state: {:?}", state);
            state = match state {
                SessionState::CollectingFilters => {
                    self.run_cycle(console)?;
                    summary.cycles += 1;
                    SessionState::PromptRestart
                }
                SessionState::PromptRestart => {
                    if !ask_restart(console)? {
                        return Ok(());
                    }
                    SessionState::CollectingFilters
                }
            };
        }
    }

    /// One pass through the collecting-filters state.
    fn run_cycle<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> Result<()> {
        let selection = get_filters(console)?;
        let trips = load_data(&self.data_dir, &selection)?;

        if trips.is_empty() {
            debug!("No trips for {}", selection);
            write_no_data(console.out())?;
        } else {
            let report = analyze_trips(&trips, selection.city)?;
            write_report(console.out(), &report)?;
            page_trips(
                console,
                &trips,
                selection.city.has_demographics(),
                self.page_size,
            )?;
        }

        console.say(FAREWELL)?;
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::{GREETING, RESTART_RETRY};
    use bikeshare_ui::raw_view::SHOW_RAW_PROMPT;
    use bikeshare_ui::report::NO_DATA_MESSAGE;
    use std::fs;
    use std::io::Cursor;
    use std::path::Path;
    use tempfile::TempDir;

    const CHICAGO_CSV: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
1423854,2017-06-23 15:09:32,2017-06-23 15:14:53,321,Wood St & Hubbard St,Damen Ave & Chicago Ave,Subscriber,Male,1992.0
955915,2017-05-25 18:19:03,2017-05-25 18:45:53,1610,Theater on the Lake,Sheffield Ave & Waveland Ave,Subscriber,Female,1992.0
9031,2017-01-02 07:57:19,2017-01-02 08:02:04,285,May St & Taylor St,Wood St & Taylor St,Customer,,
304487,2017-06-30 17:40:05,2017-06-30 17:55:08,903,Wood St & Hubbard St,Damen Ave & Chicago Ave,Subscriber,Male,1981.0
";

    fn data_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("chicago.csv"), CHICAGO_CSV).unwrap();
        dir
    }

    fn run(dir: &Path, input: &str, page_size: usize) -> (Result<SessionSummary>, String) {
        let mut console = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        let result = Session::new(dir).with_page_size(page_size).run(&mut console);
        (result, String::from_utf8(console.into_output()).unwrap())
    }

    #[test]
    fn test_single_cycle_then_exit() {
        let dir = data_dir();
        let (result, text) = run(dir.path(), "chicago\njun\nall\nno\nno\n", 5);

        let summary = result.unwrap();
        assert_eq!(summary.cycles, 1);
        assert!(!summary.input_closed);
        assert!(text.starts_with(GREETING));
        assert!(text.contains("The most common month: 6 (June)"));
        assert!(text.contains("The most common day of week: 4 (Friday)"));
        assert!(text.contains("(4) Calculating user stats..."));
        assert!(text.contains(FAREWELL));
        assert!(!text.contains("Index:"));
    }

    #[test]
    fn test_restart_runs_another_cycle() {
        let dir = data_dir();
        let input = "chicago\nall\nall\nno\nmaybe\nYES\nchicago\njun\nfri\nno\nno\n";
        let (result, text) = run(dir.path(), input, 5);

        assert_eq!(result.unwrap().cycles, 2);
        assert_eq!(text.matches(RESTART_RETRY).count(), 1);
        assert_eq!(text.matches(GREETING).count(), 2);
    }

    #[test]
    fn test_empty_selection_skips_report_and_raw_prompt() {
        let dir = data_dir();
        let (result, text) = run(dir.path(), "chicago\nfeb\nall\nno\n", 5);

        assert_eq!(result.unwrap().cycles, 1);
        assert!(text.contains(NO_DATA_MESSAGE));
        assert!(!text.contains("Calculating"));
        assert!(!text.contains(SHOW_RAW_PROMPT));
    }

    #[test]
    fn test_invalid_city_is_reprompted() {
        let dir = data_dir();
        let (result, text) = run(dir.path(), "boston\nchicago\nall\nall\nno\nno\n", 5);

        assert_eq!(result.unwrap().cycles, 1);
        assert!(text.contains("Sorry. There is no data for boston available now."));
    }

    #[test]
    fn test_raw_rows_paged() {
        let dir = data_dir();
        let (result, text) = run(dir.path(), "chicago\nall\nall\nyes\nyes\nno\nno\n", 1);

        assert_eq!(result.unwrap().cycles, 1);
        assert_eq!(text.matches("Index:").count(), 2);
        assert!(text.contains("Index: 0\n"));
        assert!(text.contains("Index: 1\n"));
    }

    #[test]
    fn test_input_closed_before_anything() {
        let dir = data_dir();
        let (result, _) = run(dir.path(), "", 5);

        let summary = result.unwrap();
        assert_eq!(summary.cycles, 0);
        assert!(summary.input_closed);
    }

    #[test]
    fn test_input_closed_at_restart_prompt() {
        let dir = data_dir();
        let (result, _) = run(dir.path(), "chicago\nall\nall\nno\n", 5);

        let summary = result.unwrap();
        assert_eq!(summary.cycles, 1);
        assert!(summary.input_closed);
    }

    #[test]
    fn test_missing_city_file_is_an_error() {
        let dir = data_dir();
        let (result, _) = run(dir.path(), "washington\nall\nall\n", 5);

        assert!(matches!(result, Err(BikeshareError::FileRead { .. })));
    }
}
