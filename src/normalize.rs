use crate::{ParseError, TripDate, TripDatePolicy, YearInference, parse_trip_date_with};

/// Turns raw trip-date input into canonical `YYYY-MM-DD` strings.
///
/// Holds the year window and the rule for year-less input. By default a
/// `DD/MM` input takes its first occurrence on or after 1 January of the
/// window's first year, so anything the parser accepts can be normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Normalizer {
    policy:    TripDatePolicy,
    inference: YearInference,
}

impl Normalizer {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_policy(mut self, policy: TripDatePolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub const fn with_year_inference(mut self, inference: YearInference) -> Self {
        self.inference = inference;
        self
    }

    /// # Errors
    /// Returns the parse, calendar, policy or inference failure for `input`.
    pub fn parse(&self, input: &str) -> Result<TripDate, ParseError> {
        parse_trip_date_with(input, &self.policy)?.resolve(&self.inference, &self.policy)
    }

    /// Canonical form of `input`, or `None` if it cannot be used.
    pub fn normalize(&self, input: &str) -> Option<String> {
        match self.parse(input) {
            Ok(date) => Some(date.to_string()),
            Err(error) => {
                tracing::debug!(input, %error, "Rejecting trip date");
                None
            }
        }
    }
}

/// Canonical `YYYY-MM-DD` form of `input` under the default policy.
///
/// `None` for anything unparseable, nonexistent, or outside the trip years.
/// Year-less `DD/MM` input lands in the first trip year that has that day.
pub fn normalize_trip_date(input: &str) -> Option<String> {
    Normalizer::default().normalize(input)
}

/// Like [`normalize_trip_date`], for dates meant to lie ahead of `from`.
///
/// Year-less `DD/MM` input takes its next occurrence on or after `from`.
/// Full dates are not checked against `from`; rejecting past dates is up to
/// the caller.
pub fn normalize_future_trip_date(input: &str, from: TripDate) -> Option<String> {
    Normalizer::default()
        .with_year_inference(YearInference::NextOccurrence { from })
        .normalize(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, year};

    #[test]
    fn test_normalize_cases() {
        struct TestCase {
            input:    &'static str,
            expected: Option<&'static str>,
        }

        let cases = [
            TestCase {
                input:    "2026-01-20",
                expected: Some("2026-01-20"),
            },
            TestCase {
                input:    "20/01/2026",
                expected: Some("2026-01-20"),
            },
            TestCase {
                input:    "20-01-2026",
                expected: Some("2026-01-20"),
            },
            TestCase {
                input:    " 5/3/2027 ",
                expected: Some("2027-03-05"),
            },
            TestCase {
                input:    "2024-02-29",
                expected: Some("2024-02-29"),
            },
            TestCase {
                input:    "2025-02-29",
                expected: None,
            },
            TestCase {
                input:    "1999-05-01",
                expected: None,
            },
            TestCase {
                input:    "15/06",
                expected: Some("2024-06-15"),
            },
            TestCase {
                input:    "29/02",
                expected: Some("2024-02-29"),
            },
            TestCase {
                input:    "",
                expected: None,
            },
            TestCase {
                input:    "next friday",
                expected: None,
            },
        ];

        for case in &cases {
            assert_eq!(
                normalize_trip_date(case.input).as_deref(),
                case.expected,
                "input {:?}",
                case.input
            );
        }
    }

    #[test]
    fn test_every_parsed_shape_normalizes() {
        for input in ["2026-01-20", "20/01/2026", "20-01-2026", "15/06", "1-2", "31/12"] {
            assert!(parse_trip_date_with(input, &TripDatePolicy::default()).is_ok(), "{input}");
            assert!(normalize_trip_date(input).is_some(), "{input}");
        }
    }

    #[test]
    fn test_short_form_follows_policy_start() {
        let normalizer = Normalizer::new().with_policy(TripDatePolicy::new(2030, 2040));
        assert_eq!(normalizer.normalize("15/06").as_deref(), Some("2030-06-15"));

        let strict = Normalizer::new().with_year_inference(YearInference::Reject);
        assert_eq!(strict.normalize("15/06"), None);
        assert!(matches!(
            strict.parse("15/06"),
            Err(ParseError::MissingYear { month: 6, day: 15 })
        ));
    }

    #[test]
    fn test_future_short_form() {
        let from = date(2026, 10, 17);
        assert_eq!(normalize_future_trip_date("15/06", from).as_deref(), Some("2027-06-15"));
        assert_eq!(normalize_future_trip_date("31/12", from).as_deref(), Some("2026-12-31"));
        assert_eq!(normalize_future_trip_date("17-10", from).as_deref(), Some("2026-10-17"));
        assert_eq!(normalize_future_trip_date("30/02", from), None);
    }

    #[test]
    fn test_future_full_dates_match_plain() {
        let from = date(2026, 10, 17);
        for input in ["2026-01-20", "20/01/2026", "2025-02-29", "garbage"] {
            assert_eq!(normalize_future_trip_date(input, from), normalize_trip_date(input), "{input}");
        }
    }

    #[test]
    fn test_configured_normalizer() {
        let normalizer = Normalizer::new()
            .with_policy(TripDatePolicy::new(2020, 2030))
            .with_year_inference(YearInference::Fixed(year(2028)));

        assert_eq!(normalizer.normalize("2021-07-04").as_deref(), Some("2021-07-04"));
        assert_eq!(normalizer.normalize("29/02").as_deref(), Some("2028-02-29"));
        assert_eq!(normalizer.normalize("2031-01-01"), None);
        assert!(matches!(
            normalizer.parse("2031-01-01"),
            Err(ParseError::YearOutOfRange { year: 2031, .. })
        ));
    }

    #[test]
    fn test_inferred_year_still_checked_against_policy() {
        let normalizer = Normalizer::new().with_year_inference(YearInference::NextOccurrence {
            from: date(2100, 12, 1),
        });
        assert_eq!(normalizer.normalize("25/12").as_deref(), Some("2100-12-25"));
        assert_eq!(normalizer.normalize("01/01"), None);
    }
}
