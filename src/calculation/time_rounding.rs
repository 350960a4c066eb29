//! Clock time rounding.
//!
//! Clock-ins round down and clock-outs round up to the configured interval,
//! measured in minutes past the hour. Seconds and sub-seconds are always
//! dropped when rounding is active.

use chrono::{Duration, NaiveDateTime, Timelike};

use crate::models::WorkInterval;

use super::calendar_week::start_of_day;

fn hour_start(instant: NaiveDateTime) -> NaiveDateTime {
    start_of_day(instant.date()) + Duration::hours(i64::from(instant.hour()))
}

/// Rounds `instant` down to the largest multiple of `interval_minutes`
/// past the hour.
///
/// An interval of zero is treated as one minute.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::round_down;
/// use chrono::NaiveDateTime;
///
/// let fmt = "%Y-%m-%d %H:%M:%S";
/// let clock_in = NaiveDateTime::parse_from_str("2026-01-15 09:07:45", fmt).unwrap();
/// let expected = NaiveDateTime::parse_from_str("2026-01-15 09:00:00", fmt).unwrap();
/// assert_eq!(round_down(clock_in, 15), expected);
/// ```
pub fn round_down(instant: NaiveDateTime, interval_minutes: u32) -> NaiveDateTime {
    let interval = i64::from(interval_minutes.max(1));
    let minute = i64::from(instant.minute());
    hour_start(instant) + Duration::minutes(minute - minute % interval)
}

/// Rounds `instant` up to the next multiple of `interval_minutes` past the
/// hour, rolling into the next hour or day when needed.
///
/// Minutes already on a multiple stay put; only seconds are dropped.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::round_up;
/// use chrono::NaiveDateTime;
///
/// let fmt = "%Y-%m-%d %H:%M:%S";
/// let clock_out = NaiveDateTime::parse_from_str("2026-01-15 16:53:10", fmt).unwrap();
/// let expected = NaiveDateTime::parse_from_str("2026-01-15 17:00:00", fmt).unwrap();
/// assert_eq!(round_up(clock_out, 15), expected);
/// ```
pub fn round_up(instant: NaiveDateTime, interval_minutes: u32) -> NaiveDateTime {
    let interval = i64::from(interval_minutes.max(1));
    let minute = i64::from(instant.minute());
    let rounded = if minute % interval == 0 {
        minute
    } else {
        (minute / interval + 1) * interval
    };
    hour_start(instant) + Duration::minutes(rounded)
}

fn positive_interval(interval_minutes: i64) -> Option<u32> {
    if interval_minutes <= 0 {
        return None;
    }
    Some(u32::try_from(interval_minutes).unwrap_or(u32::MAX))
}

/// Rounds a clock-in down; a non-positive interval leaves it untouched.
pub fn apply_clock_in_rounding(instant: NaiveDateTime, interval_minutes: i64) -> NaiveDateTime {
    match positive_interval(interval_minutes) {
        Some(interval) => round_down(instant, interval),
        None => instant,
    }
}

/// Rounds a clock-out up; a non-positive interval leaves it untouched.
pub fn apply_clock_out_rounding(instant: NaiveDateTime, interval_minutes: i64) -> NaiveDateTime {
    match positive_interval(interval_minutes) {
        Some(interval) => round_up(instant, interval),
        None => instant,
    }
}

/// Applies clock-in rounding to the start and clock-out rounding to the end
/// of a work interval, returning the rounded copy.
pub fn round_work_interval(interval: &WorkInterval, interval_minutes: i64) -> WorkInterval {
    WorkInterval {
        id: interval.id.clone(),
        start: apply_clock_in_rounding(interval.start, interval_minutes),
        end: interval
            .end
            .map(|end| apply_clock_out_rounding(end, interval_minutes)),
        break_minutes: interval.break_minutes,
    }
}
