//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod calculation_result;
mod pay_period;
mod pay_profile;
mod work_interval;

pub use calculation_result::{PayCalculation, PeriodPayReport, WeekPayBreakdown};
pub use pay_period::{PayPeriod, PayPeriodType, Week};
pub use pay_profile::{
    DEFAULT_OVERTIME_MULTIPLIER, DEFAULT_PAY_PERIOD_END_DAY, FilingStatus, PayProfile,
};
pub use work_interval::WorkInterval;
