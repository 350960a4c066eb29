//! Request types for the payroll engine API.
//!
//! This module defines the JSON request bodies accepted by each endpoint.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{
    DEFAULT_PAY_PERIOD_END_DAY, FilingStatus, PayPeriodType, PayProfile, WorkInterval,
};

/// Request body for the `/round` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundRequest {
    /// The raw clock-in instant.
    pub clock_in: NaiveDateTime,
    /// The raw clock-out instant, if the interval is closed.
    #[serde(default)]
    pub clock_out: Option<NaiveDateTime>,
    /// Rounding interval in minutes; zero or less returns the instants unchanged.
    pub interval_minutes: i64,
}

/// Request body for the `/pay-period` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayPeriodRequest {
    /// Any instant inside the wanted period.
    pub date: NaiveDateTime,
    /// The pay-period policy.
    #[serde(default)]
    pub pay_period_type: PayPeriodType,
    /// Monthly cutover day.
    #[serde(default = "default_pay_period_end_day")]
    pub pay_period_end_day: u32,
}

fn default_pay_period_end_day() -> u32 {
    DEFAULT_PAY_PERIOD_END_DAY
}

/// Request body for the `/calculate` endpoint.
///
/// `entries` should include every interval in the calendar weeks the period
/// touches, not only the ones inside it, so weekly overtime can be measured
/// over whole weeks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The worker's pay settings.
    pub profile: PayProfile,
    /// Any instant inside the period to report on.
    pub date: NaiveDateTime,
    /// Clocked work intervals.
    #[serde(default)]
    pub entries: Vec<WorkInterval>,
}

impl CalculationRequest {
    /// Validates the profile and every entry.
    pub fn validate(&self) -> EngineResult<()> {
        self.profile.validate()?;
        self.entries
            .iter()
            .enumerate()
            .try_for_each(|(position, entry)| entry.validate(position))
    }
}

/// Request body for the `/estimate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateRequest {
    /// The worker's pay settings.
    pub profile: PayProfile,
    /// Hours to estimate pay for.
    pub hours: Decimal,
    /// Hours already worked earlier in the same calendar week.
    #[serde(default)]
    pub weekly_hours_already: Decimal,
}

/// Request body for the `/net-pay` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetPayRequest {
    /// Gross pay for the paycheck.
    pub gross_pay: Decimal,
    /// Annualized gross pay used to pick brackets.
    pub annual_gross_pay: Decimal,
    /// Two-letter state code.
    #[serde(default)]
    pub state: Option<String>,
    /// Flat state rate overriding the state lookup.
    #[serde(default)]
    pub custom_rate: Option<Decimal>,
    /// Federal filing status, single when omitted.
    #[serde(default)]
    pub filing_status: Option<FilingStatus>,
}
