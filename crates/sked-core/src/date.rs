//! Day-granularity calendar dates in the `YYYYMMDD` wire format.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;

use crate::error::ScheduleError;

const WIRE_LEN: usize = 8;

/// Latest year that still fits the eight-digit wire format.
pub const MAX_YEAR: i32 = 9999;

fn fits_wire_format(date: &NaiveDate) -> bool {
    (0..=MAX_YEAR).contains(&date.year())
}

/// A calendar date without time of day or time zone.
///
/// Always serialized as exactly eight ASCII digits, e.g. `20240115`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, SerializeDisplay, DeserializeFromStr,
)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .filter(fits_wire_format)
            .map(Self)
    }

    /// Truncates an instant to its calendar day.
    pub fn from_instant(now: NaiveDateTime) -> Self {
        Self(now.date())
    }

    /// Parses the strict `YYYYMMDD` form.
    ///
    /// Separators, signs, whitespace and short or long inputs are rejected,
    /// as are digit strings that do not name a real day (`20230229`).
    pub fn parse(s: &str) -> Result<Self, ScheduleError> {
        let invalid = || ScheduleError::InvalidDate(s.to_string());

        if s.len() != WIRE_LEN || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let year: i32 = s[0..4].parse().map_err(|_| invalid())?;
        let month: u32 = s[4..6].parse().map_err(|_| invalid())?;
        let day: u32 = s[6..8].parse().map_err(|_| invalid())?;

        Self::from_ymd(year, month, day).ok_or_else(invalid)
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    /// The first instant of this day.
    pub fn at_midnight(&self) -> NaiveDateTime {
        self.0.and_time(NaiveTime::MIN)
    }

    /// Adds whole days, or `None` past year [`MAX_YEAR`].
    pub fn add_days(self, days: u64) -> Option<Self> {
        self.0
            .checked_add_days(Days::new(days))
            .filter(fits_wire_format)
            .map(Self)
    }

    /// Moves to the same month and day `years` later.
    ///
    /// February 29 landing in a common year overflows into March 1.
    pub fn add_years(self, years: u32) -> Option<Self> {
        let year = self.0.year().checked_add(i32::try_from(years).ok()?)?;
        NaiveDate::from_ymd_opt(year, self.0.month(), self.0.day())
            .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
            .filter(fits_wire_format)
            .map(Self)
    }

    /// Signed number of days from `other` to `self`.
    pub fn days_since(&self, other: CalendarDate) -> i64 {
        (self.0 - other.0).num_days()
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}{:02}{:02}",
            self.0.year(),
            self.0.month(),
            self.0.day()
        )
    }
}

impl FromStr for CalendarDate {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CalendarDate {
    type Error = ScheduleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}
