//! Display formatting for trip dates.
//!
//! These sit on rendering paths, so none of them fail: input that cannot be
//! read comes back unchanged, and empty input gives an empty string.

use crate::consts::{
    CANONICAL_DATE_LEN, MONTH_NAMES_EN, MONTH_NAMES_IT, TIME_DESIGNATOR, WEEKDAY_NAMES_EN, WEEKDAY_NAMES_IT,
};
use crate::parse::split_iso;
use crate::{Month, TripDate, TripDatePolicy, Weekday, parse_trip_date_with};

const MAX_HOUR: u8 = 23;
const MAX_MINUTE: u8 = 59;

/// Language used for month and weekday names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    #[default]
    Italian,
    English,
}

impl Locale {
    pub const fn month_name(self, month: Month) -> &'static str {
        match self {
            Self::Italian => MONTH_NAMES_IT[month.index()],
            Self::English => MONTH_NAMES_EN[month.index()],
        }
    }

    pub const fn weekday_name(self, weekday: Weekday) -> &'static str {
        match self {
            Self::Italian => WEEKDAY_NAMES_IT[weekday.index()],
            Self::English => WEEKDAY_NAMES_EN[weekday.index()],
        }
    }
}

/// Reads a stored date for display; any representable year is fine here
fn read_date(s: &str) -> Option<TripDate> {
    parse_trip_date_with(s, &TripDatePolicy::unrestricted())
        .ok()?
        .date()
}

/// `YYYY-MM-DD` to `DD/MM/YYYY`; anything else is returned unchanged.
pub fn format_date_it(canonical: &str) -> String {
    match split_iso(canonical) {
        Some((year, month, day)) => format!("{day}/{month}/{year}"),
        None => canonical.to_owned(),
    }
}

/// Date part of an ISO datetime, e.g. `2026-01-20` from `2026-01-20T10:30:00+01:00`.
pub fn extract_date_only(iso_datetime: &str) -> String {
    iso_datetime
        .char_indices()
        .nth(CANONICAL_DATE_LEN)
        .map_or(iso_datetime, |(end, _)| &iso_datetime[..end])
        .to_owned()
}

/// ISO datetime as `DD/MM/YYYY HH:MM`.
///
/// The clock time is shown as written, ignoring any offset: flight times are
/// local to the airport. Date-only input gives just `DD/MM/YYYY`. A date
/// that does not exist or a clock time past `23:59` comes back unchanged.
pub fn format_flight_date_time(iso_datetime: &str) -> String {
    if iso_datetime.is_empty() {
        return String::new();
    }
    let (date, time) = match iso_datetime.split_once([TIME_DESIGNATOR, ' ']) {
        Some((date, time)) => (date, Some(time)),
        None => (iso_datetime, None),
    };
    let Some((year, month, day)) = split_iso(date).filter(|_| read_date(date).is_some()) else {
        return iso_datetime.to_owned();
    };

    match time.map(clock_time) {
        None => format!("{day}/{month}/{year}"),
        Some(Some((hours, minutes))) => format!("{day}/{month}/{year} {hours}:{minutes}"),
        Some(None) => iso_datetime.to_owned(),
    }
}

/// `HH:MM` at the start of a time string, within a 24-hour day
fn clock_time(time: &str) -> Option<(&str, &str)> {
    let (hours, rest) = time.split_at_checked(2)?;
    let rest = rest.strip_prefix(':')?;
    let minutes = rest.get(..2)?;
    let within = |p: &str, max: u8| {
        p.bytes().all(|b| b.is_ascii_digit()) && p.parse::<u8>().is_ok_and(|v| v <= max)
    };
    (within(hours, MAX_HOUR) && within(minutes, MAX_MINUTE)).then_some((hours, minutes))
}

/// A trip range in words, in Italian. See [`format_date_range`].
pub fn format_date_range_it(start: &str, end: &str) -> String {
    format_date_range(start, end, Locale::Italian)
}

/// A trip range in words:
///
/// * same month: `10-15 Gennaio 2026`
/// * same year: `28 Gennaio - 5 Febbraio 2026`
/// * across years: `28 Dicembre 2026 - 3 Gennaio 2027`
///
/// Empty input on either side gives an empty string; unreadable dates are
/// shown as given.
pub fn format_date_range(start: &str, end: &str, locale: Locale) -> String {
    let (start, end) = (start.trim(), end.trim());
    if start.is_empty() || end.is_empty() {
        return String::new();
    }
    let (Some(s), Some(e)) = (read_date(start), read_date(end)) else {
        return format!("{start} - {end}");
    };

    let s_month = locale.month_name(s.month_typed());
    let e_month = locale.month_name(e.month_typed());
    if s.year() != e.year() {
        format!(
            "{} {s_month} {} - {} {e_month} {}",
            s.day(),
            s.year(),
            e.day(),
            e.year()
        )
    } else if s.month() != e.month() {
        format!("{} {s_month} - {} {e_month} {}", s.day(), e.day(), s.year())
    } else {
        format!("{}-{} {s_month} {}", s.day(), e.day(), s.year())
    }
}

/// Full date with weekday, e.g. `Martedì 20 Gennaio 2026`
pub fn format_date_long(date: &TripDate, locale: Locale) -> String {
    format!(
        "{} {} {} {}",
        locale.weekday_name(date.weekday()),
        date.day(),
        locale.month_name(date.month_typed()),
        date.year()
    )
}
