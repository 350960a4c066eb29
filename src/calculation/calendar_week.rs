//! Calendar week boundaries.
//!
//! Every component that needs a Sunday-to-Saturday week boundary goes through
//! this module. Weeks start on Sunday 00:00:00.000 and end on Saturday
//! 23:59:59.999 local time.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Days in a calendar week.
pub const DAYS_PER_WEEK: i64 = 7;

/// Returns midnight at the start of `date`.
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Returns 23:59:59.999 on `date`.
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    start_of_day(date) + Duration::days(1) - Duration::milliseconds(1)
}

/// Returns Sunday 00:00:00.000 of the calendar week containing `instant`.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::week_start;
/// use chrono::NaiveDateTime;
///
/// // 2026-01-15 is a Thursday
/// let thursday = NaiveDateTime::parse_from_str("2026-01-15 13:45:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let sunday = NaiveDateTime::parse_from_str("2026-01-11 00:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// assert_eq!(week_start(thursday), sunday);
/// ```
pub fn week_start(instant: NaiveDateTime) -> NaiveDateTime {
    let date = instant.date();
    let days_since_sunday = i64::from(date.weekday().num_days_from_sunday());
    start_of_day(date - Duration::days(days_since_sunday))
}

/// Returns Saturday 23:59:59.999 of the calendar week containing `instant`.
pub fn week_end(instant: NaiveDateTime) -> NaiveDateTime {
    week_start(instant) + Duration::days(DAYS_PER_WEEK) - Duration::milliseconds(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn make_datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.3f").unwrap()
    }

    #[test]
    fn test_week_start_of_sunday_is_itself_at_midnight() {
        let sunday = make_datetime("2026-01-11 15:30:00.000");
        assert_eq!(week_start(sunday), make_datetime("2026-01-11 00:00:00.000"));
    }

    #[test]
    fn test_week_start_of_saturday_night() {
        let saturday = make_datetime("2026-01-17 23:59:59.999");
        assert_eq!(week_start(saturday), make_datetime("2026-01-11 00:00:00.000"));
    }

    #[test]
    fn test_week_start_crosses_month_and_year() {
        // 2026-01-01 is a Thursday
        let new_year = make_datetime("2026-01-01 09:00:00.000");
        assert_eq!(week_start(new_year), make_datetime("2025-12-28 00:00:00.000"));
    }

    #[test]
    fn test_week_end_is_saturday_last_millisecond() {
        let wednesday = make_datetime("2026-01-14 08:00:00.000");
        let end = week_end(wednesday);
        assert_eq!(end, make_datetime("2026-01-17 23:59:59.999"));
        assert_eq!(end.weekday(), Weekday::Sat);
    }

    #[test]
    fn test_end_of_day() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 28).unwrap();
        assert_eq!(end_of_day(date), make_datetime("2026-02-28 23:59:59.999"));
    }
}
