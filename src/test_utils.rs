//! Shorthand constructors for tests.

use crate::{TripDate, TripRange, Year};

pub fn year(value: u16) -> Year {
    Year::new(value).expect("invalid test year")
}

pub fn date(y: u16, m: u8, d: u8) -> TripDate {
    TripDate::new(y, m, d).expect("invalid test date")
}

pub fn range(start: (u16, u8, u8), end: (u16, u8, u8)) -> TripRange {
    TripRange::new(date(start.0, start.1, start.2), date(end.0, end.1, end.2)).expect("invalid test range")
}
