//! Configuration types for tax estimation.
//!
//! This module contains the strongly-typed tax tables that are deserialized
//! from `tax_tables.yaml`, along with the built-in tables used when no file
//! is supplied.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{EngineError, EngineResult};
use crate::models::FilingStatus;

/// One band of a progressive bracket table.
///
/// A bracket taxes income from the previous bracket's `up_to` (or zero) up
/// to its own `up_to`. The last bracket has no upper bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Upper bound of taxable income for this band; `None` for the top band.
    #[serde(default)]
    pub up_to: Option<Decimal>,
    /// Marginal rate applied inside this band.
    pub rate: Decimal,
}

/// A standard deduction followed by a bracket table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketTable {
    /// Deducted from annual income before brackets apply.
    pub standard_deduction: Decimal,
    /// Brackets in ascending order.
    pub brackets: Vec<TaxBracket>,
}

impl BracketTable {
    /// Rate of the top (unbounded) bracket.
    pub fn top_rate(&self) -> Decimal {
        self.brackets
            .last()
            .map(|b| b.rate)
            .unwrap_or(Decimal::ZERO)
    }

    fn validate(&self, name: &str) -> EngineResult<()> {
        if self.brackets.is_empty() {
            return Err(invalid(format!("{} has no brackets", name)));
        }
        if self.standard_deduction < Decimal::ZERO {
            return Err(invalid(format!("{} has a negative standard deduction", name)));
        }
        let mut previous = Decimal::ZERO;
        let last = self.brackets.len() - 1;
        for (i, bracket) in self.brackets.iter().enumerate() {
            check_rate(&bracket.rate, name)?;
            match bracket.up_to {
                Some(upper) if i == last => {
                    return Err(invalid(format!(
                        "{} top bracket must be unbounded, found up_to {}",
                        name, upper
                    )));
                }
                Some(upper) if upper <= previous => {
                    return Err(invalid(format!("{} brackets are not ascending", name)));
                }
                Some(upper) => previous = upper,
                None if i != last => {
                    return Err(invalid(format!(
                        "{} has an unbounded bracket before the top",
                        name
                    )));
                }
                None => {}
            }
        }
        Ok(())
    }
}

/// Bracket tables keyed by filing status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketSchedule {
    /// Table for single filers.
    pub single: BracketTable,
    /// Table for married couples filing jointly.
    pub married_filing_jointly: BracketTable,
    /// Table for heads of household.
    pub head_of_household: BracketTable,
}

impl BracketSchedule {
    /// Returns the table for a filing status.
    pub fn for_status(&self, status: FilingStatus) -> &BracketTable {
        match status {
            FilingStatus::Single => &self.single,
            FilingStatus::MarriedFilingJointly => &self.married_filing_jointly,
            FilingStatus::HeadOfHousehold => &self.head_of_household,
        }
    }

    fn validate(&self, name: &str) -> EngineResult<()> {
        self.single.validate(&format!("{} single", name))?;
        self.married_filing_jointly
            .validate(&format!("{} married_filing_jointly", name))?;
        self.head_of_household
            .validate(&format!("{} head_of_household", name))
    }
}

/// Social Security and Medicare parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FicaRates {
    /// Social Security rate (6.2%).
    pub social_security_rate: Decimal,
    /// Annual wage base above which Social Security stops accruing.
    pub social_security_wage_base: Decimal,
    /// Medicare rate (1.45%), uncapped.
    pub medicare_rate: Decimal,
    /// Additional Medicare surtax rate (0.9%).
    pub additional_medicare_rate: Decimal,
    /// Annual income above which the surtax applies.
    pub additional_medicare_threshold: Decimal,
}

/// The state whose income tax is computed with brackets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressiveStateTax {
    /// Two-letter state code.
    pub state: String,
    /// Brackets and standard deductions for the state.
    pub schedule: BracketSchedule,
}

/// State income tax configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateTaxConfig {
    /// The reference jurisdiction taxed progressively.
    pub progressive: ProgressiveStateTax,
    /// Flat reference rates keyed by two-letter state code.
    #[serde(default)]
    pub flat_rates: HashMap<String, Decimal>,
}

impl StateTaxConfig {
    /// Rate used for unknown or missing states: the top single-filer rate of
    /// the progressive jurisdiction.
    pub fn default_rate(&self) -> Decimal {
        self.progressive.schedule.single.top_rate()
    }
}

/// Every table the tax estimator needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxTables {
    /// The tax year the tables describe.
    pub tax_year: i32,
    /// Federal income tax brackets.
    pub federal: BracketSchedule,
    /// FICA parameters.
    pub fica: FicaRates,
    /// State income tax configuration.
    pub state: StateTaxConfig,
}

impl TaxTables {
    /// Checks bracket ordering and rate ranges.
    pub fn validate(&self) -> EngineResult<()> {
        self.federal.validate("federal")?;
        self.state
            .progressive
            .schedule
            .validate(&format!("state {}", self.state.progressive.state))?;
        for (state, rate) in &self.state.flat_rates {
            check_rate(rate, &format!("flat rate for {}", state))?;
        }
        let fica = &self.fica;
        check_rate(&fica.social_security_rate, "social_security_rate")?;
        check_rate(&fica.medicare_rate, "medicare_rate")?;
        check_rate(&fica.additional_medicare_rate, "additional_medicare_rate")?;
        if fica.social_security_wage_base <= Decimal::ZERO {
            return Err(invalid("social_security_wage_base must be positive".to_string()));
        }
        Ok(())
    }
}

impl Default for TaxTables {
    /// Tables for tax year 2024.
    fn default() -> Self {
        Self {
            tax_year: 2024,
            federal: BracketSchedule {
                single: table(
                    14_600,
                    &[
                        (Some(11_600), 10),
                        (Some(47_150), 12),
                        (Some(100_525), 22),
                        (Some(191_950), 24),
                        (Some(243_725), 32),
                        (Some(609_350), 35),
                        (None, 37),
                    ],
                ),
                married_filing_jointly: table(
                    29_200,
                    &[
                        (Some(23_200), 10),
                        (Some(94_300), 12),
                        (Some(201_050), 22),
                        (Some(383_900), 24),
                        (Some(487_450), 32),
                        (Some(731_200), 35),
                        (None, 37),
                    ],
                ),
                head_of_household: table(
                    21_900,
                    &[
                        (Some(16_550), 10),
                        (Some(63_100), 12),
                        (Some(100_500), 22),
                        (Some(191_950), 24),
                        (Some(243_700), 32),
                        (Some(609_350), 35),
                        (None, 37),
                    ],
                ),
            },
            fica: FicaRates {
                social_security_rate: Decimal::new(62, 3),
                social_security_wage_base: Decimal::from(168_600),
                medicare_rate: Decimal::new(145, 4),
                additional_medicare_rate: Decimal::new(9, 3),
                additional_medicare_threshold: Decimal::from(200_000),
            },
            state: StateTaxConfig {
                progressive: ProgressiveStateTax {
                    state: "KS".to_string(),
                    schedule: BracketSchedule {
                        single: state_table(3_605, 23_000),
                        married_filing_jointly: state_table(8_240, 46_000),
                        head_of_household: state_table(6_180, 23_000),
                    },
                },
                flat_rates: default_flat_rates(),
            },
        }
    }
}

fn table(standard_deduction: i64, brackets: &[(Option<i64>, i64)]) -> BracketTable {
    BracketTable {
        standard_deduction: Decimal::from(standard_deduction),
        brackets: brackets
            .iter()
            .map(|&(up_to, percent)| TaxBracket {
                up_to: up_to.map(Decimal::from),
                rate: Decimal::new(percent, 2),
            })
            .collect(),
    }
}

// Kansas: 5.2% on the first tier, 5.58% above it.
fn state_table(standard_deduction: i64, first_tier: i64) -> BracketTable {
    BracketTable {
        standard_deduction: Decimal::from(standard_deduction),
        brackets: vec![
            TaxBracket {
                up_to: Some(Decimal::from(first_tier)),
                rate: Decimal::new(52, 3),
            },
            TaxBracket {
                up_to: None,
                rate: Decimal::new(558, 4),
            },
        ],
    }
}

fn default_flat_rates() -> HashMap<String, Decimal> {
    // Rates in basis points.
    let rates: &[(&str, i64)] = &[
        ("AK", 0),
        ("FL", 0),
        ("NV", 0),
        ("NH", 0),
        ("SD", 0),
        ("TN", 0),
        ("TX", 0),
        ("WA", 0),
        ("WY", 0),
        ("AL", 500),
        ("AR", 440),
        ("AZ", 250),
        ("CA", 600),
        ("CO", 440),
        ("CT", 500),
        ("DC", 650),
        ("DE", 550),
        ("GA", 539),
        ("HI", 725),
        ("IA", 570),
        ("ID", 580),
        ("IL", 495),
        ("IN", 305),
        ("KY", 400),
        ("LA", 425),
        ("MA", 500),
        ("MD", 475),
        ("ME", 675),
        ("MI", 425),
        ("MN", 680),
        ("MO", 480),
        ("MS", 470),
        ("MT", 590),
        ("NC", 450),
        ("ND", 195),
        ("NE", 584),
        ("NJ", 500),
        ("NM", 490),
        ("NY", 550),
        ("OH", 350),
        ("OK", 475),
        ("OR", 875),
        ("PA", 307),
        ("RI", 475),
        ("SC", 640),
        ("UT", 455),
        ("VA", 575),
        ("VT", 660),
        ("WI", 530),
        ("WV", 512),
    ];
    rates
        .iter()
        .map(|&(state, bps)| (state.to_string(), Decimal::new(bps, 4)))
        .collect()
}

fn check_rate(rate: &Decimal, name: &str) -> EngineResult<()> {
    if *rate < Decimal::ZERO || *rate > Decimal::ONE {
        return Err(invalid(format!(
            "{} has rate {} outside 0..=1",
            name, rate
        )));
    }
    Ok(())
}

fn invalid(message: String) -> EngineError {
    EngineError::InvalidConfig { message }
}
