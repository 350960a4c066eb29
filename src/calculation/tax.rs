//! Withholding estimates.
//!
//! Federal and state income tax and FICA are estimated on an annual basis
//! from [`TaxTables`], then prorated down to the gross pay actually earned.
//! These are estimates built from published bracket tables, not a
//! compliance-grade withholding computation.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::config::{BracketTable, TaxTables};
use crate::models::{FilingStatus, PayProfile};

/// Rounds a currency amount to cents, halves away from zero.
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// The tax-relevant part of a pay profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaxSettings<'a> {
    /// Two-letter state code, if known.
    pub state: Option<&'a str>,
    /// Flat state rate overriding the state lookup.
    pub custom_state_tax_rate: Option<Decimal>,
    /// Federal filing status.
    pub filing_status: FilingStatus,
}

impl<'a> TaxSettings<'a> {
    /// Borrows the tax settings out of a pay profile.
    pub fn from_profile(profile: &'a PayProfile) -> Self {
        Self {
            state: profile.state.as_deref(),
            custom_state_tax_rate: profile.custom_state_tax_rate,
            filing_status: profile.filing_status,
        }
    }
}

/// Annual FICA split into its components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FicaBreakdown {
    /// Social Security, capped at the wage base.
    pub social_security: Decimal,
    /// Medicare including the additional surtax.
    pub medicare: Decimal,
    /// Social Security plus Medicare.
    pub total: Decimal,
}

/// Annual state tax and the rate it was computed with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateTaxResult {
    /// Annual state income tax.
    pub tax: Decimal,
    /// The flat rate applied, or the average rate for bracketed states.
    pub effective_rate: Decimal,
}

/// Estimated withholding for one gross amount.
///
/// `fica` is always `social_security + medicare` and `net_pay` is always
/// `gross - federal_tax - state_tax - fica`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetPayBreakdown {
    /// Prorated federal income tax.
    pub federal_tax: Decimal,
    /// Prorated state income tax.
    pub state_tax: Decimal,
    /// Prorated FICA.
    pub fica: Decimal,
    /// Gross less all taxes.
    pub net_pay: Decimal,
    /// Prorated Social Security.
    pub social_security: Decimal,
    /// Prorated Medicare.
    pub medicare: Decimal,
    /// The state rate used, for display.
    pub effective_state_tax_rate: Decimal,
}

/// Estimates taxes from a set of [`TaxTables`].
#[derive(Debug, Clone, Default)]
pub struct TaxEstimator {
    tables: TaxTables,
}

fn progressive_tax(annual_income: Decimal, table: &BracketTable) -> Decimal {
    let taxable = (annual_income - table.standard_deduction).max(Decimal::ZERO);
    let mut tax = Decimal::ZERO;
    let mut lower = Decimal::ZERO;

    for bracket in &table.brackets {
        if taxable <= lower {
            break;
        }
        let upper = bracket.up_to.map_or(taxable, |limit| limit.min(taxable));
        tax += (upper - lower) * bracket.rate;
        match bracket.up_to {
            Some(limit) => lower = limit,
            None => break,
        }
    }

    tax
}

impl TaxEstimator {
    /// Creates an estimator over the given tables.
    pub fn new(tables: TaxTables) -> Self {
        Self { tables }
    }

    /// Returns the tables in use.
    pub fn tables(&self) -> &TaxTables {
        &self.tables
    }

    /// Annual federal income tax: the standard deduction for the filing
    /// status, then each bracket taxing only the income inside its band.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::calculation::TaxEstimator;
    /// use payroll_engine::models::FilingStatus;
    /// use rust_decimal::Decimal;
    ///
    /// let estimator = TaxEstimator::default();
    /// // 50,000 - 14,600 = 35,400 taxable
    /// // 11,600 × 10% + 23,800 × 12% = 1,160 + 2,856
    /// let tax = estimator.calculate_federal_tax(Decimal::from(50_000), FilingStatus::Single);
    /// assert_eq!(tax, Decimal::from(4_016));
    /// ```
    pub fn calculate_federal_tax(&self, annual_income: Decimal, status: FilingStatus) -> Decimal {
        progressive_tax(annual_income, self.tables.federal.for_status(status))
    }

    /// Annual state income tax.
    ///
    /// A custom rate wins and is applied flat. Otherwise the progressive
    /// jurisdiction uses its brackets, listed states use their flat rate and
    /// anything else falls back to the progressive jurisdiction's top rate.
    pub fn calculate_state_tax(
        &self,
        annual_income: Decimal,
        state: Option<&str>,
        custom_rate: Option<Decimal>,
        status: FilingStatus,
    ) -> StateTaxResult {
        if let Some(rate) = custom_rate {
            return flat_state_tax(annual_income, rate);
        }

        let config = &self.tables.state;
        let code = state
            .map(|s| s.trim().to_ascii_uppercase())
            .filter(|s| !s.is_empty());

        match code {
            Some(code) if code == config.progressive.state.to_ascii_uppercase() => {
                let tax = progressive_tax(annual_income, config.progressive.schedule.for_status(status));
                let effective_rate = if annual_income > Decimal::ZERO {
                    tax / annual_income
                } else {
                    Decimal::ZERO
                };
                StateTaxResult {
                    tax,
                    effective_rate,
                }
            }
            Some(code) => match config.flat_rates.get(&code) {
                Some(rate) => flat_state_tax(annual_income, *rate),
                None => flat_state_tax(annual_income, config.default_rate()),
            },
            None => flat_state_tax(annual_income, config.default_rate()),
        }
    }

    /// Annual FICA: capped Social Security plus uncapped Medicare with the
    /// additional surtax above the high-income threshold.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::calculation::TaxEstimator;
    /// use rust_decimal::Decimal;
    ///
    /// let fica = TaxEstimator::default().calculate_fica(Decimal::from(500_000));
    /// // 168,600 wage base × 6.2%
    /// assert_eq!(fica.social_security, Decimal::new(1_045_320, 2));
    /// ```
    pub fn calculate_fica(&self, annual_income: Decimal) -> FicaBreakdown {
        let rates = &self.tables.fica;
        let income = annual_income.max(Decimal::ZERO);

        let social_security = income.min(rates.social_security_wage_base) * rates.social_security_rate;
        let surtax_base = (income - rates.additional_medicare_threshold).max(Decimal::ZERO);
        let medicare = income * rates.medicare_rate + surtax_base * rates.additional_medicare_rate;

        FicaBreakdown {
            social_security,
            medicare,
            total: social_security + medicare,
        }
    }

    /// Estimates withholding for `gross_pay` by computing annual taxes on
    /// `annual_gross_pay` and scaling them by `gross_pay / annual_gross_pay`.
    ///
    /// A zero (or negative) annual gross yields zero taxes.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::calculation::{TaxEstimator, TaxSettings};
    /// use rust_decimal::Decimal;
    ///
    /// let estimator = TaxEstimator::default();
    /// let settings = TaxSettings { state: Some("TX"), ..TaxSettings::default() };
    /// let result = estimator.calculate_net_pay(Decimal::ZERO, Decimal::ZERO, &settings);
    /// assert_eq!(result.federal_tax, Decimal::ZERO);
    /// assert_eq!(result.net_pay, Decimal::ZERO);
    /// ```
    pub fn calculate_net_pay(
        &self,
        gross_pay: Decimal,
        annual_gross_pay: Decimal,
        settings: &TaxSettings<'_>,
    ) -> NetPayBreakdown {
        let state = self.calculate_state_tax(
            annual_gross_pay,
            settings.state,
            settings.custom_state_tax_rate,
            settings.filing_status,
        );

        if annual_gross_pay <= Decimal::ZERO {
            return NetPayBreakdown {
                federal_tax: Decimal::ZERO,
                state_tax: Decimal::ZERO,
                fica: Decimal::ZERO,
                net_pay: gross_pay,
                social_security: Decimal::ZERO,
                medicare: Decimal::ZERO,
                effective_state_tax_rate: state.effective_rate,
            };
        }

        let ratio = gross_pay / annual_gross_pay;
        let federal = self.calculate_federal_tax(annual_gross_pay, settings.filing_status);
        let fica = self.calculate_fica(annual_gross_pay);

        let federal_tax = round_currency(federal * ratio);
        let state_tax = round_currency(state.tax * ratio);
        let social_security = round_currency(fica.social_security * ratio);
        let medicare = round_currency(fica.medicare * ratio);
        let fica_total = social_security + medicare;

        NetPayBreakdown {
            federal_tax,
            state_tax,
            fica: fica_total,
            net_pay: gross_pay - federal_tax - state_tax - fica_total,
            social_security,
            medicare,
            effective_state_tax_rate: state.effective_rate,
        }
    }
}

fn flat_state_tax(annual_income: Decimal, rate: Decimal) -> StateTaxResult {
    StateTaxResult {
        tax: annual_income.max(Decimal::ZERO) * rate,
        effective_rate: rate,
    }
}

/// Estimates withholding with the built-in tables.
///
/// A missing filing status is treated as single.
pub fn calculate_net_pay(
    gross_pay: Decimal,
    annual_gross_pay: Decimal,
    state: Option<&str>,
    custom_rate: Option<Decimal>,
    filing_status: Option<FilingStatus>,
) -> NetPayBreakdown {
    let settings = TaxSettings {
        state,
        custom_state_tax_rate: custom_rate,
        filing_status: filing_status.unwrap_or_default(),
    };
    TaxEstimator::default().calculate_net_pay(gross_pay, annual_gross_pay, &settings)
}
