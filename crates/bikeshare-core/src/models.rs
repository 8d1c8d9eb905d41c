use std::fmt;
use std::str::FromStr;

use chrono::{Month, NaiveDateTime, Weekday};
use serde::Deserialize;

use crate::error::BikeshareError;
use crate::time_utils;

// ── Lookup tables ─────────────────────────────────────────────────────────────

/// City name → backing CSV file name.
pub const CITY_DATA: [(&str, &str); 3] = [
    ("chicago", "chicago.csv"),
    ("new york city", "new_york_city.csv"),
    ("washington", "washington.csv"),
];

/// Accepted month answers. The position of a month in this list is its
/// calendar number (`jan` = 1).
pub const VALID_MONTHS: [&str; 7] = ["all", "jan", "feb", "mar", "apr", "may", "jun"];

/// Accepted day answers. The position of a day in this list is its weekday
/// number counted from Monday (`mon` = 0).
pub const VALID_DAYS: [&str; 8] = ["mon", "tue", "wed", "thu", "fri", "sat", "sun", "all"];

/// Columns kept from the city files; anything else in the header is ignored.
pub const VALID_COLUMNS: [&str; 8] = [
    "Start Time",
    "End Time",
    "Trip Duration",
    "Start Station",
    "End Station",
    "User Type",
    "Gender",
    "Birth Year",
];

const MONTHS: [Month; 6] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
];

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

// ── City ──────────────────────────────────────────────────────────────────────

/// One of the three cities with trip data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    /// Every city, in the order of [`CITY_DATA`].
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    fn index(self) -> usize {
        match self {
            City::Chicago => 0,
            City::NewYorkCity => 1,
            City::Washington => 2,
        }
    }

    /// Lowercase name as typed at the prompt.
    pub fn name(self) -> &'static str {
        CITY_DATA[self.index()].0
    }

    /// File name of the city's trip data.
    pub fn file_name(self) -> &'static str {
        CITY_DATA[self.index()].1
    }

    /// Washington does not record rider gender or birth year.
    pub fn has_demographics(self) -> bool {
        !matches!(self, City::Washington)
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Case-insensitive; surrounding whitespace is ignored.
impl FromStr for City {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_lowercase();
        City::ALL
            .into_iter()
            .find(|c| c.name() == normalised)
            .ok_or(BikeshareError::InvalidChoice(normalised))
    }
}

// ── Month / day choices ───────────────────────────────────────────────────────

/// Parse a month answer. `"all"` yields `None`.
pub fn parse_month(s: &str) -> Result<Option<Month>, BikeshareError> {
    let answer = s.trim();
    match VALID_MONTHS.iter().position(|m| *m == answer) {
        Some(0) => Ok(None),
        Some(i) => Ok(Some(MONTHS[i - 1])),
        None => Err(BikeshareError::InvalidChoice(answer.to_string())),
    }
}

/// Parse a day-of-week answer. `"all"` yields `None`.
pub fn parse_day(s: &str) -> Result<Option<Weekday>, BikeshareError> {
    let answer = s.trim();
    match VALID_DAYS.iter().position(|d| *d == answer) {
        Some(i) if i < WEEKDAYS.len() => Ok(Some(WEEKDAYS[i])),
        Some(_) => Ok(None),
        None => Err(BikeshareError::InvalidChoice(answer.to_string())),
    }
}

// ── Selection ─────────────────────────────────────────────────────────────────

/// The filters chosen for one session iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub city: City,
    /// `None` means every month.
    pub month: Option<Month>,
    /// `None` means every day of the week.
    pub day: Option<Weekday>,
}

impl Selection {
    pub fn new(city: City, month: Option<Month>, day: Option<Weekday>) -> Self {
        Self { city, month, day }
    }

    /// Selection with no month or day filter.
    pub fn all(city: City) -> Self {
        Self::new(city, None, None)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let month = self
            .month
            .map(|m| VALID_MONTHS[m.number_from_month() as usize])
            .unwrap_or("all");
        let day = self
            .day
            .map(|d| VALID_DAYS[d.num_days_from_monday() as usize])
            .unwrap_or("all");
        write!(f, "{} / {} / {}", self.city, month, day)
    }
}

// ── Trip ──────────────────────────────────────────────────────────────────────

/// A single bicycle rental read from a city CSV file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Trip {
    /// Zero-based position of the row in the source file.
    #[serde(skip)]
    pub row: usize,
    #[serde(
        rename = "Start Time",
        deserialize_with = "time_utils::deserialize_timestamp"
    )]
    pub start_time: NaiveDateTime,
    #[serde(
        rename = "End Time",
        deserialize_with = "time_utils::deserialize_timestamp"
    )]
    pub end_time: NaiveDateTime,
    /// Trip length in seconds. Washington records fractional seconds.
    #[serde(rename = "Trip Duration")]
    pub duration_secs: f64,
    #[serde(rename = "Start Station")]
    pub start_station: String,
    #[serde(rename = "End Station")]
    pub end_station: String,
    #[serde(rename = "User Type", default)]
    pub user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    pub gender: Option<String>,
    /// Stored in the files as a float (`1992.0`).
    #[serde(
        rename = "Birth Year",
        default,
        deserialize_with = "deserialize_birth_year"
    )]
    pub birth_year: Option<i32>,
}

impl Trip {
    /// `(column, value)` pairs for every whitelisted column, in file order.
    ///
    /// Gender and Birth Year are left out when `with_demographics` is false.
    pub fn columns(&self, with_demographics: bool) -> Vec<(&'static str, String)> {
        let missing = || "(missing)".to_string();
        let mut out = vec![
            (VALID_COLUMNS[0], time_utils::format_timestamp(&self.start_time)),
            (VALID_COLUMNS[1], time_utils::format_timestamp(&self.end_time)),
            (VALID_COLUMNS[2], self.duration_secs.to_string()),
            (VALID_COLUMNS[3], self.start_station.clone()),
            (VALID_COLUMNS[4], self.end_station.clone()),
            (
                VALID_COLUMNS[5],
                self.user_type.clone().unwrap_or_else(missing),
            ),
        ];
        if with_demographics {
            out.push((VALID_COLUMNS[6], self.gender.clone().unwrap_or_else(missing)));
            out.push((
                VALID_COLUMNS[7],
                self.birth_year.map(|y| y.to_string()).unwrap_or_else(missing),
            ));
        }
        out
    }
}

fn deserialize_birth_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<f64> = Option::deserialize(deserializer)?;
    Ok(raw.filter(|y| y.is_finite()).map(|y| y.trunc() as i32))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
