//! Calculation result models.
//!
//! This module contains [`PayCalculation`], the result of allocating hours and
//! estimating taxes, and [`PeriodPayReport`], the aggregate produced for one
//! pay period together with its weekly breakdown.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{PayPeriod, PayPeriodType, Week};

/// Hours, pay and estimated withholding for a set of work intervals.
///
/// `gross_pay` is always `regular_pay + overtime_pay` and `net_pay` is always
/// `gross_pay - federal_tax - state_tax - fica`. Paycheck adjustments are
/// applied by the caller on top of these figures.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayCalculation;
/// use rust_decimal::Decimal;
///
/// let empty = PayCalculation::default();
/// assert_eq!(empty.gross_pay, Decimal::ZERO);
/// assert_eq!(empty.net_pay, Decimal::ZERO);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayCalculation {
    /// Hours under the weekly overtime threshold.
    pub regular_hours: Decimal,
    /// Hours over the weekly overtime threshold.
    pub overtime_hours: Decimal,
    /// Pay for regular hours.
    pub regular_pay: Decimal,
    /// Pay for overtime hours, multiplier included.
    pub overtime_pay: Decimal,
    /// Regular plus overtime pay.
    pub gross_pay: Decimal,
    /// Estimated federal income tax.
    pub federal_tax: Decimal,
    /// Estimated state income tax.
    pub state_tax: Decimal,
    /// Social Security plus Medicare.
    pub fica: Decimal,
    /// Gross pay less all estimated taxes.
    pub net_pay: Decimal,
    /// Social Security share of FICA.
    pub social_security: Decimal,
    /// Medicare share of FICA, additional Medicare included.
    pub medicare: Decimal,
    /// The state rate used, for display.
    pub effective_state_tax_rate: Decimal,
}

impl PayCalculation {
    /// Total hours, regular and overtime.
    pub fn total_hours(&self) -> Decimal {
        self.regular_hours + self.overtime_hours
    }
}

/// Pay for one week of a pay period.
///
/// Full-week figures count every hour of the calendar week, including hours
/// that belong to an adjacent pay period. Period figures only count intervals
/// starting inside this pay period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekPayBreakdown {
    /// The week, clipped to the pay period.
    pub week: Week,
    /// Hours worked across the whole calendar week.
    pub full_week_hours: Decimal,
    /// Regular hours across the whole calendar week.
    pub full_week_regular_hours: Decimal,
    /// Overtime hours across the whole calendar week.
    pub full_week_overtime_hours: Decimal,
    /// Number of closed intervals starting inside this week of the period.
    pub entries_count: usize,
    /// Regular hours attributed to this pay period.
    pub regular_hours: Decimal,
    /// Overtime hours attributed to this pay period.
    pub overtime_hours: Decimal,
    /// Pay for `regular_hours`.
    pub regular_pay: Decimal,
    /// Pay for `overtime_hours`.
    pub overtime_pay: Decimal,
    /// Regular plus overtime pay.
    pub gross_pay: Decimal,
    /// Estimated federal income tax for this week's gross.
    pub federal_tax: Decimal,
    /// Estimated state income tax for this week's gross.
    pub state_tax: Decimal,
    /// Estimated FICA for this week's gross.
    pub fica: Decimal,
    /// Gross less estimated taxes.
    pub net_pay: Decimal,
    /// Gross plus this week's share of the paycheck adjustment.
    pub adjusted_gross_pay: Decimal,
    /// Net plus this week's share of the paycheck adjustment.
    pub adjusted_net_pay: Decimal,
}

/// The complete pay report for one pay period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodPayReport {
    /// The pay period reported on.
    pub pay_period: PayPeriod,
    /// The policy the period was resolved under.
    pub pay_period_type: PayPeriodType,
    /// Totals for intervals starting inside the pay period.
    pub pay: PayCalculation,
    /// Totals for every interval of every calendar week the period touches.
    pub full_week_basis: PayCalculation,
    /// The flat adjustment applied to this paycheck.
    pub paycheck_adjustment: Decimal,
    /// `pay.gross_pay` plus the adjustment.
    pub adjusted_gross_pay: Decimal,
    /// `pay.net_pay` plus the adjustment.
    pub adjusted_net_pay: Decimal,
    /// Per-week breakdown in week order.
    pub weeks: Vec<WeekPayBreakdown>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_total_hours() {
        let calc = PayCalculation {
            regular_hours: dec("40"),
            overtime_hours: dec("5"),
            ..PayCalculation::default()
        };
        assert_eq!(calc.total_hours(), dec("45"));
    }

    #[test]
    fn test_pay_calculation_serializes_decimals_as_strings() {
        let calc = PayCalculation {
            regular_hours: dec("40"),
            regular_pay: dec("800.00"),
            gross_pay: dec("800.00"),
            ..PayCalculation::default()
        };
        let json = serde_json::to_string(&calc).unwrap();
        assert!(json.contains("\"regular_hours\":\"40\""));
        assert!(json.contains("\"gross_pay\":\"800.00\""));
    }

    #[test]
    fn test_pay_calculation_round_trip() {
        let calc = PayCalculation {
            regular_hours: dec("40"),
            overtime_hours: dec("5"),
            regular_pay: dec("800"),
            overtime_pay: dec("150"),
            gross_pay: dec("950"),
            ..PayCalculation::default()
        };
        let json = serde_json::to_string(&calc).unwrap();
        let parsed: PayCalculation = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, calc);
    }
}
