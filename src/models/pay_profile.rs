//! Pay profile model.
//!
//! A [`PayProfile`] gathers every per-user pay setting in one place, with the
//! documented defaults applied both by [`Default`] and by serde.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::PayPeriodType;

/// Default overtime multiplier (time and a half).
pub const DEFAULT_OVERTIME_MULTIPLIER: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// Default monthly cutover day.
pub const DEFAULT_PAY_PERIOD_END_DAY: u32 = 10;

/// Federal filing status used to select standard deductions and brackets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilingStatus {
    /// Single filer.
    #[default]
    Single,
    /// Married filing jointly.
    MarriedFilingJointly,
    /// Head of household.
    HeadOfHousehold,
}

impl std::fmt::Display for FilingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilingStatus::Single => write!(f, "single"),
            FilingStatus::MarriedFilingJointly => write!(f, "married_filing_jointly"),
            FilingStatus::HeadOfHousehold => write!(f, "head_of_household"),
        }
    }
}

/// A user's pay configuration.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{PayPeriodType, PayProfile};
/// use rust_decimal::Decimal;
///
/// let profile: PayProfile = serde_json::from_str(r#"{ "hourly_rate": "20" }"#).unwrap();
/// assert_eq!(profile.hourly_rate, Decimal::from(20));
/// assert_eq!(profile.overtime_multiplier, Decimal::new(15, 1));
/// assert_eq!(profile.pay_period_type, PayPeriodType::Monthly);
/// assert_eq!(profile.pay_period_end_day, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayProfile {
    /// Base hourly rate.
    pub hourly_rate: Decimal,
    /// Multiplier applied to the hourly rate for overtime hours.
    #[serde(default = "default_overtime_multiplier")]
    pub overtime_multiplier: Decimal,
    /// The pay-period policy.
    #[serde(default)]
    pub pay_period_type: PayPeriodType,
    /// Monthly cutover day (the last day of each monthly period).
    #[serde(default = "default_pay_period_end_day")]
    pub pay_period_end_day: u32,
    /// Two-letter state code used for state tax lookup.
    #[serde(default)]
    pub state: Option<String>,
    /// Flat state tax rate overriding the state lookup.
    #[serde(default)]
    pub custom_state_tax_rate: Option<Decimal>,
    /// Flat amount added to (or subtracted from) each paycheck.
    #[serde(default)]
    pub paycheck_adjustment: Decimal,
    /// Federal filing status.
    #[serde(default)]
    pub filing_status: FilingStatus,
    /// Clock rounding interval in minutes; zero or less disables rounding.
    #[serde(default)]
    pub rounding_interval_minutes: i64,
}

fn default_overtime_multiplier() -> Decimal {
    DEFAULT_OVERTIME_MULTIPLIER
}

fn default_pay_period_end_day() -> u32 {
    DEFAULT_PAY_PERIOD_END_DAY
}

impl Default for PayProfile {
    fn default() -> Self {
        Self {
            hourly_rate: Decimal::ZERO,
            overtime_multiplier: DEFAULT_OVERTIME_MULTIPLIER,
            pay_period_type: PayPeriodType::default(),
            pay_period_end_day: DEFAULT_PAY_PERIOD_END_DAY,
            state: None,
            custom_state_tax_rate: None,
            paycheck_adjustment: Decimal::ZERO,
            filing_status: FilingStatus::default(),
            rounding_interval_minutes: 0,
        }
    }
}

impl PayProfile {
    /// Creates a profile with the given hourly rate and every other field defaulted.
    pub fn with_hourly_rate(hourly_rate: Decimal) -> Self {
        Self {
            hourly_rate,
            ..Self::default()
        }
    }

    /// Checks the ranges the calculation functions rely on.
    pub fn validate(&self) -> EngineResult<()> {
        if self.hourly_rate <= Decimal::ZERO {
            return Err(invalid("hourly_rate", "must be greater than zero"));
        }
        if self.overtime_multiplier < Decimal::ONE {
            return Err(invalid("overtime_multiplier", "must be at least 1"));
        }
        if !(1..=31).contains(&self.pay_period_end_day) {
            return Err(invalid("pay_period_end_day", "must be between 1 and 31"));
        }
        if let Some(rate) = self.custom_state_tax_rate {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(invalid(
                    "custom_state_tax_rate",
                    "must be a fraction between 0 and 1",
                ));
            }
        }
        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> EngineError {
    EngineError::InvalidProfile {
        field: field.to_string(),
        message: message.to_string(),
    }
}
