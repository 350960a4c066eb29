//! Calculation logic for the payroll engine.
//!
//! This module contains the pure computations behind a paycheck: clock-time
//! rounding, pay period resolution, decomposition of a period into calendar
//! weeks, weekly overtime allocation, withholding estimates, and the period
//! report that ties them together.

mod calendar_week;
mod overtime;
mod pay_period;
mod period_report;
mod tax;
mod time_rounding;
mod week_decomposition;

pub use calendar_week::{DAYS_PER_WEEK, end_of_day, start_of_day, week_end, week_start};
pub use overtime::{
    ANNUALIZATION_FACTOR, WEEKLY_OVERTIME_THRESHOLD, WeekAllocation, allocate_weekly_hours,
    annualize, calculate_pay, calculate_pay_for_entries, calculate_pay_for_entries_with,
    calculate_pay_with, split_additional_hours, split_weekly_hours,
};
pub use pay_period::{get_current_pay_period, get_pay_period_for_date};
pub use period_report::{calculate_current_period_pay, calculate_period_pay};
pub use tax::{
    FicaBreakdown, NetPayBreakdown, StateTaxResult, TaxEstimator, TaxSettings, calculate_net_pay,
    round_currency,
};
pub use time_rounding::{
    apply_clock_in_rounding, apply_clock_out_rounding, round_down, round_up, round_work_interval,
};
pub use week_decomposition::{full_week_window, get_weeks_in_pay_period};
