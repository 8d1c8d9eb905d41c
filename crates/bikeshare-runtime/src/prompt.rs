//! Re-prompting input validation for the filter and restart questions.

use std::io::{BufRead, Write};

use bikeshare_core::error::{BikeshareError, Result};
use bikeshare_core::formatting::rule;
use bikeshare_core::models::{
    parse_day, parse_month, City, Selection, CITY_DATA, VALID_DAYS, VALID_MONTHS,
};
use bikeshare_ui::console::Console;
use chrono::{Month, Weekday};
use tracing::debug;

pub const GREETING: &str = "Hello! Let's explore some US bikeshare data!";
pub const RESTART_PROMPT: &str = "Would you like to restart? Enter yes or no \n";
pub const RESTART_RETRY: &str = "Please enter yes or no.";

fn options_prompt(subject: &str, options: &[&str]) -> String {
    format!(
        "{} \nThere are {} options available now as below: \n{:?} \nPlease enter the {} you want to see the data: ",
        rule(),
        options.len(),
        options,
        subject
    )
}

/// Ask `prompt` until `parse` accepts the answer.
///
/// [`BikeshareError::InvalidChoice`] prints its message and asks again; any
/// other error is returned.
pub fn ask_until_valid<R, W, T>(
    console: &mut Console<R, W>,
    prompt: &str,
    parse: impl Fn(&str) -> Result<T>,
) -> Result<T>
where
    R: BufRead,
    W: Write,
{
    loop {
        let answer = console.ask(prompt)?;
        match parse(&answer) {
            Ok(value) => return Ok(value),
            Err(err @ BikeshareError::InvalidChoice(_)) => {
                debug!("rejected answer {:?}", answer);
                console.say(&err)?;
            }
            Err(err) => return Err(err),
        }
    }
}

/// City name, case-insensitive.
pub fn ask_city<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<City> {
    let names: Vec<&str> = CITY_DATA.iter().map(|(name, _)| *name).collect();
    ask_until_valid(console, &options_prompt("city", &names), str::parse::<City>)
}

/// Month abbreviation or `all`; exact match.
pub fn ask_month<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<Option<Month>> {
    ask_until_valid(console, &options_prompt("month", &VALID_MONTHS), parse_month)
}

/// Day abbreviation or `all`; exact match.
pub fn ask_day<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<Option<Weekday>> {
    ask_until_valid(console, &options_prompt("day", &VALID_DAYS), parse_day)
}

/// Greet the user and collect a full [`Selection`].
pub fn get_filters<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<Selection> {
    console.say(GREETING)?;
    let city = ask_city(console)?;
    let month = ask_month(console)?;
    let day = ask_day(console)?;
    console.say(rule())?;
    Ok(Selection::new(city, month, day))
}

/// Ask whether to run another cycle, repeating until the answer is `yes` or
/// `no` in any case.
pub fn ask_restart<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<bool> {
    loop {
        let answer = console.ask(RESTART_PROMPT)?.to_lowercase();
        match answer.as_str() {
            "yes" => return Ok(true),
            "no" => return Ok(false),
            _ => console.say(RESTART_RETRY)?,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
