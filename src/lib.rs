//! Trip date handling without timezone-sensitive date objects.
//!
//! Everything works on plain year/month/day triples: parsing user input in
//! ISO or European form, normalizing to `YYYY-MM-DD`, measuring trip length
//! and rendering dates for display.

mod consts;
mod format;
mod normalize;
mod parse;
mod policy;
mod prelude;
mod range;
#[cfg(test)]
mod test_utils;
mod types;

pub use consts::*;
pub use format::{
    Locale, extract_date_only, format_date_it, format_date_long, format_date_range, format_date_range_it,
    format_flight_date_time,
};
pub use normalize::{Normalizer, normalize_future_trip_date, normalize_trip_date};
pub use parse::{InputFormat, MonthDay, ParsedDate, parse_trip_date, parse_trip_date_with};
pub use policy::{TripDatePolicy, YearInference};
pub use range::{RangeError, TripRange, calculate_trip_days, is_valid_date_range};
pub use types::{Day, Month, Year, days_in_month, is_leap_year};

use crate::prelude::*;
use std::ops::Sub;
use std::str::FromStr;
use types::{days_before_month, days_before_year};

/// A validated calendar date with no time or zone attached.
///
/// Field order makes the derived `Ord` chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{year}-{month}-{day}")]
pub struct TripDate {
    year:  Year,
    month: Month,
    day:   Day,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Empty date string")]
    EmptyInput,
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be {}-{})", "_0", MIN_YEAR, MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year:04}-{month:02}")]
    InvalidDay { year: u16, month: u8, day: u8 },
    #[display(fmt = "Year {year} is outside the accepted trip years {min}-{max}")]
    YearOutOfRange { year: u16, min: u16, max: u16 },
    #[display(fmt = "No year given for {day:02}/{month:02}")]
    MissingYear { month: u8, day: u8 },
}

impl std::error::Error for ParseError {}

/// Position of a date on a monotonic day axis.
///
/// Only differences between two counts mean anything; the absolute value is
/// not exposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayCount(i64);

impl Sub for DayCount {
    type Output = i64;

    fn sub(self, rhs: Self) -> i64 {
        self.0 - rhs.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// Zero-based position with Monday first
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl TripDate {
    /// Builds a date from raw components, checking calendar validity only.
    ///
    /// # Errors
    /// Returns the `ParseError` for the first invalid component.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, ParseError> {
        let year = Year::new(year)?;
        let month = Month::new(month)?;
        let day = Day::new(day, year, month)?;
        Ok(Self { year, month, day })
    }

    /// Builds a date from already validated parts.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidDay` if `day` does not exist in that year and month,
    /// e.g. a year-less 29 February resolved to a common year.
    pub fn from_parts(year: Year, month: Month, day: Day) -> Result<Self, ParseError> {
        let day = Day::new(day.get(), year, month)?;
        Ok(Self { year, month, day })
    }

    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    pub const fn month_typed(&self) -> Month {
        self.month
    }

    /// Position on the day axis; subtract two counts to get the days between them
    pub const fn to_day_count(&self) -> DayCount {
        let (y, m) = (self.year.get(), self.month.get());
        DayCount(days_before_year(y) + days_before_month(y, m) + self.day.get() as i64)
    }

    fn from_day_count(count: DayCount) -> Option<Self> {
        let first = days_before_year(MIN_YEAR) + 1;
        let last = days_before_year(MAX_YEAR + 1);
        if count.0 < first || count.0 > last {
            return None;
        }

        // off by at most one year
        let estimate = (count.0 - 1) * i64::from(consts::GREGORIAN_CYCLE) / consts::DAYS_PER_GREGORIAN_CYCLE + 1;
        let mut year = u16::try_from(estimate).ok()?.clamp(MIN_YEAR, MAX_YEAR);
        while year < MAX_YEAR && days_before_year(year + 1) < count.0 {
            year += 1;
        }
        while year > MIN_YEAR && days_before_year(year) >= count.0 {
            year -= 1;
        }

        let day_of_year = count.0 - days_before_year(year);
        let month = (JANUARY..=DECEMBER)
            .rev()
            .find(|&m| days_before_month(year, m) < day_of_year)?;
        let day = u8::try_from(day_of_year - days_before_month(year, month)).ok()?;
        Self::new(year, month, day).ok()
    }

    /// Moves the date by `days` (negative goes back). `None` past the representable years.
    pub fn add_days(&self, days: i64) -> Option<Self> {
        let target = self.to_day_count().0.checked_add(days)?;
        Self::from_day_count(DayCount(target))
    }

    /// Day after this one, rolling month and year
    pub fn next_day(&self) -> Option<Self> {
        self.add_days(1)
    }

    pub fn weekday(&self) -> Weekday {
        // day count 1 is Monday 0001-01-01 in the proleptic Gregorian calendar
        let idx = (self.to_day_count().0 - 1).rem_euclid(consts::DAYS_IN_WEEK);
        Weekday::ALL[usize::try_from(idx).unwrap_or_default()]
    }
}

impl FromStr for TripDate {
    type Err = ParseError;

    /// Accepts any full-date shape the parser knows, under the default trip policy.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_trip_date(s)?.require_year()
    }
}

impl TryFrom<(u16, u8, u8)> for TripDate {
    type Error = ParseError;

    fn try_from(value: (u16, u8, u8)) -> Result<Self, Self::Error> {
        Self::new(value.0, value.1, value.2)
    }
}

impl TryFrom<time::Date> for TripDate {
    type Error = ParseError;

    fn try_from(date: time::Date) -> Result<Self, Self::Error> {
        let year = u16::try_from(date.year()).map_err(|_| ParseError::InvalidFormat(format!("year {}", date.year())))?;
        Self::new(year, u8::from(date.month()), date.day())
    }
}

impl TryFrom<TripDate> for time::Date {
    type Error = time::error::ComponentRange;

    fn try_from(date: TripDate) -> Result<Self, Self::Error> {
        let month = time::Month::try_from(date.month())?;
        Self::from_calendar_date(i32::from(date.year()), month, date.day())
    }
}

impl serde::Serialize for TripDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for TripDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
