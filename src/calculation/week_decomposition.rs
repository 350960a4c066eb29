//! Week decomposition of pay periods.
//!
//! Splits a [`PayPeriod`] into the calendar weeks that intersect it. Reported
//! week bounds are clipped to the period; the true calendar bounds travel with
//! each [`Week`] so overtime can still be computed over the whole week.

use chrono::{Duration, NaiveDateTime};

use crate::models::{PayPeriod, Week};

use super::calendar_week::{DAYS_PER_WEEK, week_end, week_start};

/// Returns the weeks of `period` in order, numbered from 1.
///
/// The weeks are contiguous (each week's end is one millisecond before the
/// next week's start) and together cover exactly `period.start..=period.end`.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::get_weeks_in_pay_period;
/// use payroll_engine::models::PayPeriod;
/// use chrono::NaiveDateTime;
///
/// let fmt = "%Y-%m-%d %H:%M:%S%.3f";
/// // Wednesday 2026-03-11 through Friday 2026-04-10
/// let period = PayPeriod {
///     start: NaiveDateTime::parse_from_str("2026-03-11 00:00:00.000", fmt).unwrap(),
///     end: NaiveDateTime::parse_from_str("2026-04-10 23:59:59.999", fmt).unwrap(),
/// };
/// let weeks = get_weeks_in_pay_period(&period);
///
/// assert_eq!(weeks.len(), 5);
/// assert_eq!(weeks[0].start, period.start);
/// assert_eq!(weeks[0].calendar_start, NaiveDateTime::parse_from_str("2026-03-08 00:00:00.000", fmt).unwrap());
/// assert_eq!(weeks[4].end, period.end);
/// ```
pub fn get_weeks_in_pay_period(period: &PayPeriod) -> Vec<Week> {
    let mut weeks = Vec::new();
    let mut current_week_start = week_start(period.start);
    let mut week_number = 1;

    while current_week_start <= period.end {
        let calendar_end = week_end(current_week_start);
        weeks.push(Week {
            start: current_week_start.max(period.start),
            end: calendar_end.min(period.end),
            week_number,
            calendar_start: current_week_start,
            calendar_end,
        });
        current_week_start += Duration::days(DAYS_PER_WEEK);
        week_number += 1;
    }

    weeks
}

/// Returns the span entries must be fetched for to compute overtime for
/// `period`: Sunday of its first week through Saturday of its last week.
pub fn full_week_window(period: &PayPeriod) -> (NaiveDateTime, NaiveDateTime) {
    (week_start(period.start), week_end(period.end))
}
