//! Pay period reports.
//!
//! A pay period rarely lines up with calendar weeks, so the weekly overtime
//! threshold has to be measured over whole calendar weeks while the amounts
//! reported for the period only include intervals that start inside it.
//!
//! Within each calendar week intervals are taken in start order: an interval
//! is regular up to whatever remains of the 40 hours when it starts, and the
//! rest of it is overtime. Overtime therefore lands in the period whose
//! intervals pushed the week over the threshold.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{PayPeriod, PayProfile, PeriodPayReport, WeekPayBreakdown, WorkInterval};

use super::overtime::{
    annualize, build_pay_calculation, calculate_pay_for_entries_with, split_additional_hours,
    split_weekly_hours,
};
use super::pay_period::get_current_pay_period;
use super::tax::{TaxEstimator, TaxSettings, round_currency};
use super::week_decomposition::{full_week_window, get_weeks_in_pay_period};

#[derive(Debug, Default)]
struct WeekTally {
    full_week_hours: Decimal,
    entries_count: usize,
    regular_hours: Decimal,
    overtime_hours: Decimal,
}

/// Builds the report for `period` from every interval the caller holds.
///
/// `entries` should contain at least every interval inside
/// [`full_week_window`] of the period; intervals outside that window are
/// ignored, as are open intervals.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{TaxEstimator, calculate_period_pay, get_current_pay_period};
/// use payroll_engine::models::{PayPeriodType, PayProfile, WorkInterval};
/// use chrono::{Duration, NaiveDateTime};
/// use rust_decimal::Decimal;
///
/// let profile = PayProfile {
///     pay_period_type: PayPeriodType::Weekly,
///     state: Some("TX".to_string()),
///     ..PayProfile::with_hourly_rate(Decimal::from(20))
/// };
/// let monday = NaiveDateTime::parse_from_str("2026-01-12 08:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let entries: Vec<WorkInterval> = (0..5)
///     .map(|day| {
///         let start = monday + Duration::days(day);
///         WorkInterval::new(start, Some(start + Duration::hours(9)), 0)
///     })
///     .collect();
///
/// let period = get_current_pay_period(monday, profile.pay_period_type, profile.pay_period_end_day);
/// let report = calculate_period_pay(&TaxEstimator::default(), &profile, &period, &entries);
///
/// assert_eq!(report.weeks.len(), 1);
/// assert_eq!(report.pay.overtime_hours, Decimal::from(5));
/// assert_eq!(report.pay.gross_pay, Decimal::from(950));
/// ```
pub fn calculate_period_pay(
    estimator: &TaxEstimator,
    profile: &PayProfile,
    period: &PayPeriod,
    entries: &[WorkInterval],
) -> PeriodPayReport {
    let settings = TaxSettings::from_profile(profile);
    let weeks = get_weeks_in_pay_period(period);

    let mut closed: Vec<(&WorkInterval, Decimal)> = entries
        .iter()
        .filter_map(|entry| entry.worked_hours().map(|hours| (entry, hours)))
        .collect();
    closed.sort_by_key(|(entry, _)| entry.start);

    let tallies: Vec<WeekTally> = weeks
        .iter()
        .map(|week| {
            let mut tally = WeekTally::default();
            for (entry, hours) in closed
                .iter()
                .filter(|(entry, _)| week.calendar_contains(entry.start))
            {
                let (regular, overtime) = split_additional_hours(*hours, tally.full_week_hours);
                tally.full_week_hours += *hours;
                if period.contains(entry.start) {
                    tally.entries_count += 1;
                    tally.regular_hours += regular;
                    tally.overtime_hours += overtime;
                }
            }
            debug!(
                week_number = week.week_number,
                calendar_start = %week.calendar_start,
                full_week_hours = %tally.full_week_hours,
                regular_hours = %tally.regular_hours,
                overtime_hours = %tally.overtime_hours,
                "Allocated week"
            );
            tally
        })
        .collect();

    let regular_hours: Decimal = tallies.iter().map(|t| t.regular_hours).sum();
    let overtime_hours: Decimal = tallies.iter().map(|t| t.overtime_hours).sum();
    let pay = build_pay_calculation(
        estimator,
        regular_hours,
        overtime_hours,
        profile.hourly_rate,
        profile.overtime_multiplier,
        &settings,
    );

    let (window_start, window_end) = full_week_window(period);
    let window_entries: Vec<WorkInterval> = entries
        .iter()
        .filter(|entry| entry.start >= window_start && entry.start <= window_end)
        .cloned()
        .collect();
    let full_week_basis = calculate_pay_for_entries_with(
        estimator,
        &window_entries,
        profile.hourly_rate,
        profile.overtime_multiplier,
        &settings,
    );

    let annual_gross = annualize(pay.gross_pay);
    let adjustment = profile.paycheck_adjustment;
    let adjustment_share = if weeks.is_empty() {
        Decimal::ZERO
    } else {
        adjustment / Decimal::from(weeks.len())
    };

    let week_breakdowns = weeks
        .iter()
        .zip(tallies)
        .map(|(week, tally)| {
            let (full_week_regular_hours, full_week_overtime_hours) =
                split_weekly_hours(tally.full_week_hours);
            let regular_pay = round_currency(tally.regular_hours * profile.hourly_rate);
            let overtime_pay = round_currency(
                tally.overtime_hours * profile.hourly_rate * profile.overtime_multiplier,
            );
            let gross_pay = regular_pay + overtime_pay;
            let taxes = estimator.calculate_net_pay(gross_pay, annual_gross, &settings);

            WeekPayBreakdown {
                week: *week,
                full_week_hours: tally.full_week_hours,
                full_week_regular_hours,
                full_week_overtime_hours,
                entries_count: tally.entries_count,
                regular_hours: tally.regular_hours,
                overtime_hours: tally.overtime_hours,
                regular_pay,
                overtime_pay,
                gross_pay,
                federal_tax: taxes.federal_tax,
                state_tax: taxes.state_tax,
                fica: taxes.fica,
                net_pay: taxes.net_pay,
                adjusted_gross_pay: gross_pay + adjustment_share,
                adjusted_net_pay: taxes.net_pay + adjustment_share,
            }
        })
        .collect();

    PeriodPayReport {
        pay_period: *period,
        pay_period_type: profile.pay_period_type,
        adjusted_gross_pay: pay.gross_pay + adjustment,
        adjusted_net_pay: pay.net_pay + adjustment,
        paycheck_adjustment: adjustment,
        pay,
        full_week_basis,
        weeks: week_breakdowns,
    }
}

/// Resolves the pay period containing `now` from the profile and builds its
/// report.
pub fn calculate_current_period_pay(
    estimator: &TaxEstimator,
    profile: &PayProfile,
    now: NaiveDateTime,
    entries: &[WorkInterval],
) -> PeriodPayReport {
    let period = get_current_pay_period(now, profile.pay_period_type, profile.pay_period_end_day);
    calculate_period_pay(estimator, profile, &period, entries)
}
