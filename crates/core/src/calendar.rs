//! Calendar helpers: ISO-8601 week numbering and the two textual date forms.
//!
//! Dates are accepted as `YYYY-MM-DD` and displayed as `DD-MM-YYYY`. Parsing
//! falls back to the display form so previously rendered dates round-trip.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use thiserror::Error;

/// Input form accepted on writes.
pub const INPUT_FORMAT: &str = "%Y-%m-%d";

/// Form used in every response and export.
pub const DISPLAY_FORMAT: &str = "%d-%m-%Y";

/// A date string matched neither accepted form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid date format '{input}', use YYYY-MM-DD")]
pub struct InvalidDateFormat {
    /// The rejected input.
    pub input: String,
}

/// A week number outside the ISO range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid week number {0}, expected 1-53")]
pub struct InvalidWeek(pub String);

/// An ISO-8601 week number, always within `1..=53`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Week(u32);

impl Week {
    /// Lowest valid week number.
    pub const MIN: u32 = 1;
    /// Highest valid week number.
    pub const MAX: u32 = 53;

    /// Validates a raw week number.
    pub fn new(raw: i64) -> Result<Self, InvalidWeek> {
        match u32::try_from(raw) {
            Ok(week) if (Self::MIN..=Self::MAX).contains(&week) => Ok(Self(week)),
            _ => Err(InvalidWeek(raw.to_string())),
        }
    }

    /// The ISO week containing `date`.
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self(iso_week(date))
    }

    /// Returns the week number.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Returns the week number as a signed column value.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn as_i32(self) -> i32 {
        self.0 as i32
    }
}

impl From<Week> for i32 {
    fn from(week: Week) -> Self {
        week.as_i32()
    }
}

impl fmt::Display for Week {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Week {
    type Err = InvalidWeek;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map_err(|_| InvalidWeek(s.to_string()))
            .and_then(Self::new)
    }
}

/// Returns the ISO-8601 week number of `date`.
///
/// Weeks start on Monday and week 1 holds the year's first Thursday, so early
/// January can fall in week 52/53 and late December in week 1.
#[must_use]
pub fn iso_week(date: NaiveDate) -> u32 {
    date.iso_week().week()
}

/// Formats a date as `DD-MM-YYYY`.
#[must_use]
pub fn format_display(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

/// Parses `YYYY-MM-DD`, then `DD-MM-YYYY` if the first form fails.
pub fn parse_input(raw: &str) -> Result<NaiveDate, InvalidDateFormat> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, INPUT_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(trimmed, DISPLAY_FORMAT))
        .map_err(|_| InvalidDateFormat {
            input: raw.to_string(),
        })
}

/// First and last calendar day of `year`, or `None` outside chrono's range.
#[must_use]
pub fn year_bounds(year: i32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let last = NaiveDate::from_ymd_opt(year, 12, 31)?;
    Some((first, last))
}

/// Serde adapter rendering dates in display form.
///
/// Deserialization goes through [`parse_input`], so both forms are accepted.
pub mod display_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{DISPLAY_FORMAT, parse_input};

    /// Serializes `date` as `DD-MM-YYYY`.
    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(DISPLAY_FORMAT))
    }

    /// Deserializes either accepted form.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_input(&raw).map_err(serde::de::Error::custom)
    }
}
