use crate::prelude::*;
use crate::{
    DATE_SEPARATOR, Day, EUROPEAN_SEPARATOR, Month, ParseError, TripDate, TripDatePolicy, Year, YearInference,
};

/// Textual shape an input was recognized as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum InputFormat {
    /// `YYYY-MM-DD`, zero padded
    #[display(fmt = "YYYY-MM-DD")]
    Iso,
    /// `D[D]/M[M]/YYYY` or `D[D]-M[M]-YYYY`
    #[display(fmt = "DD/MM/YYYY")]
    European,
    /// `D[D]/M[M]` or `D[D]-M[M]`, no year
    #[display(fmt = "DD/MM")]
    EuropeanShort,
}

/// A day and month with no year yet.
///
/// The day is checked against the longest form of the month, so `29/02` is
/// kept until a year is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthDay {
    month: Month,
    day:   Day,
}

impl MonthDay {
    /// # Errors
    /// Returns `InvalidMonth` or `InvalidDay` if the pair cannot occur in any year.
    pub fn new(month: u8, day: u8) -> Result<Self, ParseError> {
        let month = Month::new(month)?;
        let day = Day::new_any_year(day, month)?;
        Ok(Self { month, day })
    }

    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    /// Assigns a year through `inference`, then applies `policy`.
    ///
    /// # Errors
    /// Whatever the inference rule or the policy reject.
    pub fn resolve(&self, inference: &YearInference, policy: &TripDatePolicy) -> Result<TripDate, ParseError> {
        let date = inference.resolve(self.month(), self.day(), policy)?;
        policy.check_year(date.year())?;
        Ok(date)
    }
}

/// Outcome of a successful parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParsedDate {
    /// Input carried a full date
    Complete { date: TripDate, format: InputFormat },
    /// Input was `DD/MM`; the caller still has to pick a year
    MissingYear(MonthDay),
}

impl ParsedDate {
    pub const fn format(&self) -> InputFormat {
        match self {
            Self::Complete { format, .. } => *format,
            Self::MissingYear(_) => InputFormat::EuropeanShort,
        }
    }

    /// The date, if the input carried a year
    pub const fn date(&self) -> Option<TripDate> {
        match self {
            Self::Complete { date, .. } => Some(*date),
            Self::MissingYear(_) => None,
        }
    }

    /// # Errors
    /// Returns `ParseError::MissingYear` for year-less input.
    pub const fn require_year(self) -> Result<TripDate, ParseError> {
        match self {
            Self::Complete { date, .. } => Ok(date),
            Self::MissingYear(md) => Err(ParseError::MissingYear {
                month: md.month(),
                day:   md.day(),
            }),
        }
    }

    /// Completes year-less input through `inference`; full dates pass through.
    ///
    /// # Errors
    /// See [`MonthDay::resolve`].
    pub fn resolve(self, inference: &YearInference, policy: &TripDatePolicy) -> Result<TripDate, ParseError> {
        match self {
            Self::Complete { date, .. } => Ok(date),
            Self::MissingYear(md) => md.resolve(inference, policy),
        }
    }
}

/// Parses a trip date under the default [`TripDatePolicy`].
///
/// # Errors
/// See [`parse_trip_date_with`].
pub fn parse_trip_date(input: &str) -> Result<ParsedDate, ParseError> {
    parse_trip_date_with(input, &TripDatePolicy::default())
}

/// Parses `input` as ISO `YYYY-MM-DD`, then European `DD/MM/YYYY`, then
/// year-less `DD/MM`. Surrounding whitespace is ignored and the European
/// forms accept `/` or `-`, used consistently.
///
/// # Errors
/// `EmptyInput` for blank input, `InvalidFormat` if no shape matches, and the
/// component errors for dates that do not exist or fall outside `policy`.
pub fn parse_trip_date_with(input: &str, policy: &TripDatePolicy) -> Result<ParsedDate, ParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    if let Some((year, month, day)) = match_iso(trimmed) {
        let date = build_date(year, month, day, policy)?;
        return Ok(ParsedDate::Complete {
            date,
            format: InputFormat::Iso,
        });
    }

    let invalid = || ParseError::InvalidFormat(trimmed.to_owned());
    let separator = [EUROPEAN_SEPARATOR, DATE_SEPARATOR]
        .into_iter()
        .find(|&c| trimmed.contains(c))
        .ok_or_else(invalid)?;
    let parts: Vec<&str> = trimmed.split(separator).collect();

    match parts.as_slice() {
        [d, m, y] if is_digits(d, 1, 2) && is_digits(m, 1, 2) && is_digits(y, 4, 4) => {
            let date = build_date(parse_u16(y)?, parse_u8(m)?, parse_u8(d)?, policy)?;
            Ok(ParsedDate::Complete {
                date,
                format: InputFormat::European,
            })
        }
        [d, m] if is_digits(d, 1, 2) && is_digits(m, 1, 2) => {
            Ok(ParsedDate::MissingYear(MonthDay::new(parse_u8(m)?, parse_u8(d)?)?))
        }
        _ => Err(invalid()),
    }
}

fn build_date(year: u16, month: u8, day: u8, policy: &TripDatePolicy) -> Result<TripDate, ParseError> {
    let year_typed = Year::new(year)?;
    let month = Month::new(month)?;
    let day = Day::new(day, year_typed, month)?;
    policy.check_year(year)?;
    TripDate::from_parts(year_typed, month, day)
}

/// Splits a string shaped like `YYYY-MM-DD` into its parts, without calendar checks
pub(crate) fn split_iso(s: &str) -> Option<(&str, &str, &str)> {
    let (year, rest) = s.split_at_checked(4)?;
    let rest = rest.strip_prefix(DATE_SEPARATOR)?;
    let (month, rest) = rest.split_at_checked(2)?;
    let day = rest.strip_prefix(DATE_SEPARATOR)?;
    (is_digits(year, 4, 4) && is_digits(month, 2, 2) && is_digits(day, 2, 2)).then_some((year, month, day))
}

fn match_iso(s: &str) -> Option<(u16, u8, u8)> {
    let (year, month, day) = split_iso(s)?;
    Some((year.parse().ok()?, month.parse().ok()?, day.parse().ok()?))
}

fn is_digits(s: &str, min_len: usize, max_len: usize) -> bool {
    (min_len..=max_len).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit())
}

fn parse_u16(s: &str) -> Result<u16, ParseError> {
    s.parse::<u16>().map_err(|_| ParseError::InvalidFormat(s.to_owned()))
}

fn parse_u8(s: &str) -> Result<u8, ParseError> {
    s.parse::<u8>().map_err(|_| ParseError::InvalidFormat(s.to_owned()))
}
