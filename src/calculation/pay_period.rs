//! Pay period resolution.
//!
//! Resolves the pay period enclosing an instant under either policy:
//!
//! - **Weekly:** the Sunday-to-Saturday calendar week.
//! - **Monthly:** with cutover day `D`, from day `D + 1` of one month through
//!   day `D` of the next. Cutover days past the end of a short month roll
//!   forward into the following month.

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime};

use crate::models::{PayPeriod, PayPeriodType};

use super::calendar_week::{end_of_day, start_of_day, week_end, week_start};

/// Returns `day` of the month `month_offset` months away from `anchor`,
/// letting days past the end of that month roll into the next one.
fn month_day_with_rollover(anchor: NaiveDate, month_offset: i32, day: u32) -> NaiveDate {
    let first = anchor.with_day(1).unwrap_or(anchor);
    let shifted = if month_offset >= 0 {
        first.checked_add_months(Months::new(month_offset.unsigned_abs()))
    } else {
        first.checked_sub_months(Months::new(month_offset.unsigned_abs()))
    };
    shifted.unwrap_or(first) + Duration::days(i64::from(day) - 1)
}

fn monthly_period(instant: NaiveDateTime, end_day: u32) -> PayPeriod {
    let date = instant.date();
    let (start_offset, end_offset) = if date.day() > end_day {
        (0, 1)
    } else {
        (-1, 0)
    };
    PayPeriod {
        start: start_of_day(month_day_with_rollover(date, start_offset, end_day + 1)),
        end: end_of_day(month_day_with_rollover(date, end_offset, end_day)),
    }
}

/// Returns the pay period containing `instant`.
///
/// `end_day` is only consulted for monthly periods.
///
/// # Examples
///
/// ## Monthly, after the cutover day
///
/// ```
/// use payroll_engine::calculation::get_current_pay_period;
/// use payroll_engine::models::PayPeriodType;
/// use chrono::NaiveDateTime;
///
/// let fmt = "%Y-%m-%d %H:%M:%S%.3f";
/// let now = NaiveDateTime::parse_from_str("2026-03-15 12:00:00.000", fmt).unwrap();
/// let period = get_current_pay_period(now, PayPeriodType::Monthly, 10);
///
/// assert_eq!(period.start, NaiveDateTime::parse_from_str("2026-03-11 00:00:00.000", fmt).unwrap());
/// assert_eq!(period.end, NaiveDateTime::parse_from_str("2026-04-10 23:59:59.999", fmt).unwrap());
/// ```
///
/// ## Weekly
///
/// ```
/// use payroll_engine::calculation::get_current_pay_period;
/// use payroll_engine::models::PayPeriodType;
/// use chrono::NaiveDateTime;
///
/// let fmt = "%Y-%m-%d %H:%M:%S%.3f";
/// let now = NaiveDateTime::parse_from_str("2026-03-18 12:00:00.000", fmt).unwrap();
/// let period = get_current_pay_period(now, PayPeriodType::Weekly, 10);
///
/// assert_eq!(period.start, NaiveDateTime::parse_from_str("2026-03-15 00:00:00.000", fmt).unwrap());
/// assert_eq!(period.end, NaiveDateTime::parse_from_str("2026-03-21 23:59:59.999", fmt).unwrap());
/// ```
pub fn get_current_pay_period(
    instant: NaiveDateTime,
    period_type: PayPeriodType,
    end_day: u32,
) -> PayPeriod {
    match period_type {
        PayPeriodType::Weekly => PayPeriod {
            start: week_start(instant),
            end: week_end(instant),
        },
        PayPeriodType::Monthly => monthly_period(instant, end_day),
    }
}

/// Returns the pay period containing `instant`.
///
/// Same resolution as [`get_current_pay_period`]; kept under this name for
/// callers resolving historical dates.
pub fn get_pay_period_for_date(
    instant: NaiveDateTime,
    period_type: PayPeriodType,
    end_day: u32,
) -> PayPeriod {
    get_current_pay_period(instant, period_type, end_day)
}
