use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Normalizer, ParseError, RANGE_SEPARATOR, TripDate, parse_trip_date, prelude::*};

/// A trip from `start` to `end`, where `end` is strictly after `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{start}/{end}")]
pub struct TripRange {
    start: TripDate,
    end:   TripDate,
}

/// Error type for trip range operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// End date does not come after the start date.
    #[error("Invalid trip range: end ({end}) must be after start ({start})")]
    NotAfterStart { start: TripDate, end: TripDate },

    /// Error parsing one of the dates.
    #[error(transparent)]
    ParseError(#[from] ParseError),

    /// Invalid range format.
    #[error("Invalid range format: {0}")]
    InvalidFormat(String),
}

impl TripRange {
    /// # Errors
    /// Returns `RangeError::NotAfterStart` if `end <= start`.
    pub fn new(start: TripDate, end: TripDate) -> Result<Self, RangeError> {
        if end <= start {
            return Err(RangeError::NotAfterStart { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parses both ends the way [`normalize_trip_date`](crate::normalize_trip_date) does.
    ///
    /// # Errors
    /// Either date failing to parse, or the pair not forming a valid range.
    pub fn parse(start: &str, end: &str) -> Result<Self, RangeError> {
        let normalizer = Normalizer::default();
        Self::new(normalizer.parse(start)?, normalizer.parse(end)?)
    }

    pub const fn start(&self) -> TripDate {
        self.start
    }

    pub const fn end(&self) -> TripDate {
        self.end
    }

    /// Length of the trip in days, always at least 1
    pub const fn days(&self) -> u32 {
        // end > start and both lie in 1..=9999, so this fits
        (self.end.to_day_count().0 - self.start.to_day_count().0) as u32
    }

    /// Nights spent away; a trip ending the next morning is one night
    pub const fn nights(&self) -> u32 {
        self.days()
    }

    /// Whether `date` falls on any day of the trip, both ends included
    pub fn contains(&self, date: &TripDate) -> bool {
        self.start <= *date && *date <= self.end
    }

    /// Whether the two trips share at least one calendar day
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Every calendar day from `start` to `end` inclusive
    pub fn iter_days(&self) -> impl Iterator<Item = TripDate> + '_ {
        std::iter::successors(Some(self.start), |d| d.next_day()).take_while(|d| *d <= self.end)
    }
}

/// Days between two trip dates.
///
/// Bad input on either side, or an end before the start, gives 0.
pub fn calculate_trip_days(start: &str, end: &str) -> u32 {
    let normalizer = Normalizer::default();
    let (Ok(start), Ok(end)) = (normalizer.parse(start), normalizer.parse(end)) else {
        return 0;
    };
    u32::try_from(end.to_day_count() - start.to_day_count()).unwrap_or(0)
}

/// Whether both dates parse and `end` is strictly after `start`.
pub fn is_valid_date_range(start: &str, end: &str) -> bool {
    TripRange::parse(start, end).is_ok()
}

impl FromStr for TripRange {
    type Err = RangeError;

    /// Parses the canonical `start/end` form
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut parts = trimmed.split(RANGE_SEPARATOR);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(start), Some(end), None) => {
                let start = parse_canonical(start)?;
                let end = parse_canonical(end)?;
                Self::new(start, end)
            }
            _ => Err(RangeError::InvalidFormat(format!(
                "expected exactly one '{RANGE_SEPARATOR}' between two YYYY-MM-DD dates: {s}"
            ))),
        }
    }
}

/// Only ISO dates may appear in `start/end`; `DD/MM/YYYY` would clash with the separator
fn parse_canonical(s: &str) -> Result<TripDate, RangeError> {
    let parsed = parse_trip_date(s)?;
    if parsed.format() != crate::InputFormat::Iso {
        return Err(RangeError::InvalidFormat(s.to_owned()));
    }
    Ok(parsed.require_year()?)
}

impl Serialize for TripRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TripRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
