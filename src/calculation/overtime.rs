//! Weekly overtime allocation.
//!
//! Worked hours are grouped by calendar week (Sunday through Saturday, keyed
//! by the week containing each interval's start). Within a week the first
//! 40 hours are regular and anything beyond is overtime.
//!
//! Withholding for the resulting gross is estimated on an annualized figure
//! of `gross × 24`, whatever the user's actual pay-period policy.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{PayCalculation, WorkInterval};

use super::calendar_week::week_start;
use super::tax::{TaxEstimator, TaxSettings, round_currency};

/// Hours per calendar week paid at the regular rate.
pub const WEEKLY_OVERTIME_THRESHOLD: Decimal = Decimal::from_parts(40, 0, 0, false, 0);

/// Pay periods per year assumed when annualizing gross pay for tax brackets.
pub const ANNUALIZATION_FACTOR: Decimal = Decimal::from_parts(24, 0, 0, false, 0);

/// Worked hours of one calendar week split at the overtime threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekAllocation {
    /// Sunday 00:00:00.000 of the calendar week.
    pub week_start: NaiveDateTime,
    /// All hours worked in the week.
    pub worked_hours: Decimal,
    /// Hours up to the threshold.
    pub regular_hours: Decimal,
    /// Hours beyond the threshold.
    pub overtime_hours: Decimal,
}

/// Splits a week's total hours into `(regular, overtime)`.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::split_weekly_hours;
/// use rust_decimal::Decimal;
///
/// let (regular, overtime) = split_weekly_hours(Decimal::from(45));
/// assert_eq!(regular, Decimal::from(40));
/// assert_eq!(overtime, Decimal::from(5));
/// ```
pub fn split_weekly_hours(hours: Decimal) -> (Decimal, Decimal) {
    split_additional_hours(hours, Decimal::ZERO)
}

/// Splits `hours` worked on top of `weekly_hours_already` into
/// `(regular, overtime)` against the weekly threshold.
pub fn split_additional_hours(hours: Decimal, weekly_hours_already: Decimal) -> (Decimal, Decimal) {
    let remaining_regular = (WEEKLY_OVERTIME_THRESHOLD - weekly_hours_already).max(Decimal::ZERO);
    let regular = hours.min(remaining_regular);
    (regular, hours - regular)
}

/// Annualizes a gross amount for bracket selection.
pub fn annualize(gross_pay: Decimal) -> Decimal {
    gross_pay * ANNUALIZATION_FACTOR
}

/// Groups closed intervals by calendar week and splits each week's hours.
///
/// Weeks are returned in chronological order. Open intervals are skipped.
pub fn allocate_weekly_hours(entries: &[WorkInterval]) -> Vec<WeekAllocation> {
    let mut hours_by_week: BTreeMap<NaiveDateTime, Decimal> = BTreeMap::new();

    for entry in entries {
        if let Some(hours) = entry.worked_hours() {
            *hours_by_week.entry(week_start(entry.start)).or_default() += hours;
        }
    }

    hours_by_week
        .into_iter()
        .map(|(week_start, worked_hours)| {
            let (regular_hours, overtime_hours) = split_weekly_hours(worked_hours);
            WeekAllocation {
                week_start,
                worked_hours,
                regular_hours,
                overtime_hours,
            }
        })
        .collect()
}

/// Prices regular and overtime hours and attaches estimated withholding.
pub(crate) fn build_pay_calculation(
    estimator: &TaxEstimator,
    regular_hours: Decimal,
    overtime_hours: Decimal,
    hourly_rate: Decimal,
    overtime_multiplier: Decimal,
    settings: &TaxSettings<'_>,
) -> PayCalculation {
    let regular_pay = round_currency(regular_hours * hourly_rate);
    let overtime_pay = round_currency(overtime_hours * hourly_rate * overtime_multiplier);
    let gross_pay = regular_pay + overtime_pay;
    let taxes = estimator.calculate_net_pay(gross_pay, annualize(gross_pay), settings);

    PayCalculation {
        regular_hours,
        overtime_hours,
        regular_pay,
        overtime_pay,
        gross_pay,
        federal_tax: taxes.federal_tax,
        state_tax: taxes.state_tax,
        fica: taxes.fica,
        net_pay: taxes.net_pay,
        social_security: taxes.social_security,
        medicare: taxes.medicare,
        effective_state_tax_rate: taxes.effective_state_tax_rate,
    }
}

/// Calculates pay for a set of intervals with an explicit estimator and
/// tax settings.
pub fn calculate_pay_for_entries_with(
    estimator: &TaxEstimator,
    entries: &[WorkInterval],
    hourly_rate: Decimal,
    overtime_multiplier: Decimal,
    settings: &TaxSettings<'_>,
) -> PayCalculation {
    let (regular_hours, overtime_hours) = allocate_weekly_hours(entries).iter().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(regular, overtime), week| (regular + week.regular_hours, overtime + week.overtime_hours),
    );

    build_pay_calculation(
        estimator,
        regular_hours,
        overtime_hours,
        hourly_rate,
        overtime_multiplier,
        settings,
    )
}

/// Calculates pay for a set of intervals under the weekly overtime rule,
/// using the built-in tax tables and a single filing status.
///
/// To get correct overtime for a week that straddles two pay periods, pass
/// every interval of that calendar week, not only those inside the period.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_pay_for_entries;
/// use payroll_engine::models::WorkInterval;
/// use chrono::{Duration, NaiveDateTime};
/// use rust_decimal::Decimal;
///
/// let monday = NaiveDateTime::parse_from_str("2026-01-12 08:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// // Five 9-hour days
/// let entries: Vec<WorkInterval> = (0..5)
///     .map(|day| {
///         let start = monday + Duration::days(day);
///         WorkInterval::new(start, Some(start + Duration::hours(9)), 0)
///     })
///     .collect();
///
/// let pay = calculate_pay_for_entries(&entries, Decimal::from(20), Decimal::new(15, 1), Some("TX"), None);
/// assert_eq!(pay.regular_hours, Decimal::from(40));
/// assert_eq!(pay.overtime_hours, Decimal::from(5));
/// assert_eq!(pay.regular_pay, Decimal::from(800));
/// assert_eq!(pay.overtime_pay, Decimal::from(150));
/// assert_eq!(pay.gross_pay, Decimal::from(950));
/// ```
pub fn calculate_pay_for_entries(
    entries: &[WorkInterval],
    hourly_rate: Decimal,
    overtime_multiplier: Decimal,
    state: Option<&str>,
    custom_state_tax_rate: Option<Decimal>,
) -> PayCalculation {
    let settings = TaxSettings {
        state,
        custom_state_tax_rate,
        ..TaxSettings::default()
    };
    calculate_pay_for_entries_with(
        &TaxEstimator::default(),
        entries,
        hourly_rate,
        overtime_multiplier,
        &settings,
    )
}

/// What-if estimate with an explicit estimator and tax settings.
pub fn calculate_pay_with(
    estimator: &TaxEstimator,
    hours: Decimal,
    hourly_rate: Decimal,
    weekly_hours_already: Decimal,
    overtime_multiplier: Decimal,
    settings: &TaxSettings<'_>,
) -> PayCalculation {
    let (regular_hours, overtime_hours) = split_additional_hours(hours, weekly_hours_already);
    build_pay_calculation(
        estimator,
        regular_hours,
        overtime_hours,
        hourly_rate,
        overtime_multiplier,
        settings,
    )
}

/// Estimates pay for `hours` more hours in a week that already has
/// `weekly_hours_already` worked, using the built-in tax tables.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_pay;
/// use rust_decimal::Decimal;
///
/// let pay = calculate_pay(Decimal::from(8), Decimal::from(20), Decimal::from(36), Decimal::new(15, 1));
/// assert_eq!(pay.regular_hours, Decimal::from(4));
/// assert_eq!(pay.overtime_hours, Decimal::from(4));
/// assert_eq!(pay.gross_pay, Decimal::from(200));
/// ```
pub fn calculate_pay(
    hours: Decimal,
    hourly_rate: Decimal,
    weekly_hours_already: Decimal,
    overtime_multiplier: Decimal,
) -> PayCalculation {
    calculate_pay_with(
        &TaxEstimator::default(),
        hours,
        hourly_rate,
        weekly_hours_already,
        overtime_multiplier,
        &TaxSettings::default(),
    )
}
