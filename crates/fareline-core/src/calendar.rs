//! Event dates: ISO-8601 parsing and the weekend-rate check.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use tracing::trace;

use crate::error::{PricingError, PricingResult};

/// Naive date-time layouts accepted after RFC 3339 has been ruled out.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parses an ISO-8601 date or date-time.
///
/// Accepted shapes:
/// - `2024-06-08` (midnight)
/// - `2024-06-08T12:30`, `2024-06-08T12:30:00`, `2024-06-08T12:30:00.250`
///   (a space may replace the `T`)
/// - RFC 3339 with an offset, e.g. `2024-06-08T12:30:00+02:00`. The offset is
///   dropped and the wall-clock time kept.
///
/// ```rust
/// use chrono::{Datelike, Timelike};
/// use fareline_core::calendar::parse_date;
///
/// let d = parse_date("2024-06-08T12:30:00").unwrap();
/// assert_eq!((d.year(), d.month(), d.day()), (2024, 6, 8));
/// assert_eq!((d.hour(), d.minute()), (12, 30));
/// assert!(parse_date("08/06/2024").is_err());
/// ```
pub fn parse_date(input: &str) -> PricingResult<NaiveDateTime> {
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(input) {
        return Ok(with_offset.naive_local());
    }

    let mut first_error = None;
    for format in NAIVE_FORMATS {
        match NaiveDateTime::parse_from_str(input, format) {
            Ok(parsed) => {
                trace!(input, format, "Parsed event date");
                return Ok(parsed);
            }
            Err(e) => {
                first_error.get_or_insert(e);
            }
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }

    Err(PricingError::Parse {
        input: input.to_string(),
        reason: first_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "unrecognized format".to_string()),
    })
}

/// True when the date falls on a Saturday or Sunday.
pub fn is_weekend_rate<D: Datelike>(date: &D) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_full_date_time() {
        let d = parse_date("2024-06-08T12:30:00").unwrap();
        assert_eq!(d.year(), 2024);
        assert_eq!(d.month(), 6);
        assert_eq!(d.day(), 8);
        assert_eq!(d.hour(), 12);
        assert_eq!(d.minute(), 30);
        assert_eq!(d.second(), 0);
    }

    #[test]
    fn test_parse_variants() {
        let expected = date(2024, 6, 8).and_hms_opt(12, 30, 0).unwrap();
        assert_eq!(parse_date("2024-06-08 12:30:00").unwrap(), expected);
        assert_eq!(parse_date("2024-06-08T12:30").unwrap(), expected);
        assert_eq!(
            parse_date("2024-06-08T12:30:00.250").unwrap(),
            date(2024, 6, 8).and_hms_milli_opt(12, 30, 0, 250).unwrap()
        );
    }

    #[test]
    fn test_parse_date_only_is_midnight() {
        let d = parse_date("2024-06-08").unwrap();
        assert_eq!(d, date(2024, 6, 8).and_hms_opt(0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_keeps_wall_clock_of_offset_input() {
        let d = parse_date("2024-06-08T23:30:00+02:00").unwrap();
        assert_eq!(d, date(2024, 6, 8).and_hms_opt(23, 30, 0).unwrap());
        let z = parse_date("2024-06-08T23:30:00Z").unwrap();
        assert_eq!(z, d);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for input in ["", "2024-13-01", "2024-02-30T10:00:00", "08/06/2024", "tomorrow"] {
            let err = parse_date(input).unwrap_err();
            assert!(
                matches!(err, PricingError::Parse { input: ref got, .. } if got == input),
                "expected parse error for {:?}",
                input
            );
        }
    }

    #[test]
    fn test_weekday_is_not_weekend() {
        // 2024-06-06 is a Thursday
        assert!(!is_weekend_rate(&date(2024, 6, 6)));
        assert!(!is_weekend_rate(&date(2024, 6, 7)));
    }

    #[test]
    fn test_saturday_and_sunday_are_weekend() {
        assert!(is_weekend_rate(&date(2024, 6, 8)));
        assert!(is_weekend_rate(&date(2024, 6, 9)));
        assert!(is_weekend_rate(&parse_date("2024-06-09T18:00:00").unwrap()));
    }
}
