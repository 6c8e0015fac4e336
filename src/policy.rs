use serde::{Deserialize, Serialize};

use crate::{
    DEFAULT_MAX_TRIP_YEAR, DEFAULT_MIN_TRIP_YEAR, JANUARY, MAX_YEAR, MIN_DAY, MIN_YEAR, ParseError, TripDate, Year,
};

/// Years a trip date may fall in.
///
/// Deserializes from a partial table; missing keys fall back to the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct TripDatePolicy {
    pub min_year: u16,
    pub max_year: u16,
}

impl Default for TripDatePolicy {
    fn default() -> Self {
        Self {
            min_year: DEFAULT_MIN_TRIP_YEAR,
            max_year: DEFAULT_MAX_TRIP_YEAR,
        }
    }
}

impl TripDatePolicy {
    pub const fn new(min_year: u16, max_year: u16) -> Self {
        Self { min_year, max_year }
    }

    /// Every year the `Year` type can hold, for reading back stored dates
    pub const fn unrestricted() -> Self {
        Self::new(MIN_YEAR, MAX_YEAR)
    }

    /// 1 January of `min_year`
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear` if `min_year` is not a representable year.
    pub fn first_day(&self) -> Result<TripDate, ParseError> {
        TripDate::new(self.min_year, JANUARY, MIN_DAY)
    }

    pub const fn allows(&self, year: u16) -> bool {
        year >= self.min_year && year <= self.max_year
    }

    /// # Errors
    /// Returns `ParseError::YearOutOfRange` if `year` is outside the window.
    pub const fn check_year(&self, year: u16) -> Result<(), ParseError> {
        if self.allows(year) {
            Ok(())
        } else {
            Err(ParseError::YearOutOfRange {
                year,
                min: self.min_year,
                max: self.max_year,
            })
        }
    }
}

/// How a year is chosen for `DD/MM` input that does not carry one.
///
/// None of the rules read the wall clock; callers wanting "from today" pass
/// today's date to `NextOccurrence`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum YearInference {
    /// First occurrence on or after 1 January of the policy's `min_year`.
    #[default]
    FromPolicyStart,
    /// Year-less input is an error.
    Reject,
    /// Always use this year.
    Fixed(Year),
    /// First occurrence of the day and month on or after `from`.
    ///
    /// 29 February moves on to the next leap year.
    NextOccurrence { from: TripDate },
}

/// Leap years recur at most every 8 years (across a skipped century year)
const MAX_LEAP_SEARCH: u16 = 8;

impl YearInference {
    /// Picks the year for a year-less month/day pair.
    ///
    /// # Errors
    /// `MissingYear` under `Reject`; `InvalidDay` when the fixed year has no such day
    /// or no leap year is reachable.
    pub fn resolve(&self, month: u8, day: u8, policy: &TripDatePolicy) -> Result<TripDate, ParseError> {
        match *self {
            Self::Reject => Err(ParseError::MissingYear { month, day }),
            Self::Fixed(year) => TripDate::new(year.get(), month, day),
            Self::FromPolicyStart => next_occurrence(policy.first_day()?, month, day),
            Self::NextOccurrence { from } => next_occurrence(from, month, day),
        }
    }
}

fn next_occurrence(from: TripDate, month: u8, day: u8) -> Result<TripDate, ParseError> {
    let start = if (month, day) >= (from.month(), from.day()) {
        from.year()
    } else {
        from.year().saturating_add(1)
    };
    let mut last_err = ParseError::InvalidDay { year: start, month, day };
    for year in start..=start.saturating_add(MAX_LEAP_SEARCH) {
        match TripDate::new(year, month, day) {
            Ok(date) => {
                tracing::trace!(%from, %date, "Inferred year for day/month input");
                return Ok(date);
            }
            Err(e @ ParseError::InvalidDay { .. }) => last_err = e,
            Err(e) => return Err(e),
        }
    }
    Err(last_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, year};

    #[test]
    fn test_default_window() {
        let policy = TripDatePolicy::default();
        assert!(policy.allows(2024));
        assert!(policy.allows(2100));
        assert!(!policy.allows(2023));
        assert!(!policy.allows(2101));
        assert!(matches!(
            policy.check_year(1999),
            Err(ParseError::YearOutOfRange {
                year: 1999,
                min:  2024,
                max:  2100,
            })
        ));
    }

    #[test]
    fn test_policy_deserializes_with_defaults() {
        let policy: TripDatePolicy = serde_json::from_str(r#"{"min_year": 2020}"#).unwrap();
        assert_eq!(policy, TripDatePolicy::new(2020, DEFAULT_MAX_TRIP_YEAR));

        let policy: TripDatePolicy = serde_json::from_str("{}").unwrap();
        assert_eq!(policy, TripDatePolicy::default());
    }

    #[test]
    fn test_unrestricted() {
        let policy = TripDatePolicy::unrestricted();
        assert!(policy.allows(1));
        assert!(policy.allows(1999));
        assert!(policy.allows(9999));
    }

    #[test]
    fn test_reject() {
        assert!(matches!(
            YearInference::Reject.resolve(6, 15, &TripDatePolicy::default()),
            Err(ParseError::MissingYear { month: 6, day: 15 })
        ));
    }

    #[test]
    fn test_from_policy_start() {
        let inference = YearInference::default();
        assert_eq!(inference, YearInference::FromPolicyStart);
        assert_eq!(inference.resolve(6, 15, &TripDatePolicy::default()), Ok(date(2024, 6, 15)));
        assert_eq!(inference.resolve(1, 1, &TripDatePolicy::default()), Ok(date(2024, 1, 1)));
        assert_eq!(inference.resolve(2, 29, &TripDatePolicy::new(2025, 2100)), Ok(date(2028, 2, 29)));
        assert_eq!(inference.resolve(6, 15, &TripDatePolicy::new(2030, 2040)), Ok(date(2030, 6, 15)));
        assert!(matches!(
            inference.resolve(6, 15, &TripDatePolicy::new(0, 2040)),
            Err(ParseError::InvalidYear(0))
        ));
    }

    #[test]
    fn test_fixed() {
        assert_eq!(YearInference::Fixed(year(2027)).resolve(6, 15, &TripDatePolicy::default()), Ok(date(2027, 6, 15)));
        assert!(YearInference::Fixed(year(2027)).resolve(2, 29, &TripDatePolicy::default()).is_err());
    }

    #[test]
    fn test_next_occurrence_cases() {
        struct TestCase {
            from:        (u16, u8, u8),
            input:       (u8, u8),
            expected:    (u16, u8, u8),
            description: &'static str,
        }

        let cases = [
            TestCase {
                from:        (2026, 3, 1),
                input:       (6, 15),
                expected:    (2026, 6, 15),
                description: "later this year",
            },
            TestCase {
                from:        (2026, 10, 17),
                input:       (6, 15),
                expected:    (2027, 6, 15),
                description: "already passed this year",
            },
            TestCase {
                from:        (2026, 6, 15),
                input:       (6, 15),
                expected:    (2026, 6, 15),
                description: "same day counts as upcoming",
            },
            TestCase {
                from:        (2026, 1, 10),
                input:       (2, 29),
                expected:    (2028, 2, 29),
                description: "leap day skips to next leap year",
            },
            TestCase {
                from:        (2028, 1, 10),
                input:       (2, 29),
                expected:    (2028, 2, 29),
                description: "leap day in a leap year",
            },
        ];

        for case in &cases {
            let from = TripDate::try_from(case.from).unwrap();
            let inferred = YearInference::NextOccurrence { from }
                .resolve(case.input.0, case.input.1, &TripDatePolicy::default())
                .unwrap();
            assert_eq!(
                inferred,
                TripDate::try_from(case.expected).unwrap(),
                "{}",
                case.description
            );
        }
    }
}
