//! Calculation output structures

use crate::request::InvestmentKind;
use serde::{Deserialize, Serialize};

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Round a money amount to cents
pub fn round_cents(value: f64) -> f64 {
    round_to(value, 2)
}

/// Outcome of a single lump-sum investment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SingleResult {
    pub principal: f64,
    pub annual_rate_pct: f64,
    pub term_days: u32,
    /// Term expressed in average-length months, one decimal
    pub term_months: f64,
    pub total_return: f64,
    pub final_amount: f64,
    /// Equal to the nominal rate: a single deposit does not compound
    pub effective_annual_rate_pct: f64,
}

/// How the effective annual rate of a recurring investment was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectiveRateMethod {
    /// Annualized internal rate of return of the contribution flows
    InternalRateOfReturn,
    /// Realized growth factor annualized over the run (runs of 12+ months)
    GrowthFactor,
    /// Realized return rate scaled linearly to a year (runs under 12 months)
    SimpleExtrapolation,
}

/// Outcome of a recurring monthly contribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecurringResult {
    pub monthly_contribution: f64,
    pub annual_rate_pct: f64,
    pub num_months: u32,
    pub total_contributed: f64,
    pub total_return: f64,
    pub final_amount: f64,
    pub effective_annual_rate_pct: f64,
    pub effective_rate_method: EffectiveRateMethod,
}

/// Result of either calculator, tagged by investment kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "investment_kind", rename_all = "snake_case")]
pub enum InvestmentResult {
    Single(SingleResult),
    Recurring(RecurringResult),
}

impl InvestmentResult {
    pub fn kind(&self) -> InvestmentKind {
        match self {
            InvestmentResult::Single(_) => InvestmentKind::Single,
            InvestmentResult::Recurring(_) => InvestmentKind::Recurring,
        }
    }

    pub fn total_return(&self) -> f64 {
        match self {
            InvestmentResult::Single(r) => r.total_return,
            InvestmentResult::Recurring(r) => r.total_return,
        }
    }

    pub fn final_amount(&self) -> f64 {
        match self {
            InvestmentResult::Single(r) => r.final_amount,
            InvestmentResult::Recurring(r) => r.final_amount,
        }
    }

    pub fn effective_annual_rate_pct(&self) -> f64 {
        match self {
            InvestmentResult::Single(r) => r.effective_annual_rate_pct,
            InvestmentResult::Recurring(r) => r.effective_annual_rate_pct,
        }
    }

    /// Copy with money rounded to cents and percentages to two decimals
    pub fn rounded(&self) -> Self {
        match *self {
            InvestmentResult::Single(r) => InvestmentResult::Single(SingleResult {
                principal: round_cents(r.principal),
                total_return: round_cents(r.total_return),
                final_amount: round_cents(r.final_amount),
                effective_annual_rate_pct: round_to(r.effective_annual_rate_pct, 2),
                ..r
            }),
            InvestmentResult::Recurring(r) => InvestmentResult::Recurring(RecurringResult {
                monthly_contribution: round_cents(r.monthly_contribution),
                total_contributed: round_cents(r.total_contributed),
                total_return: round_cents(r.total_return),
                final_amount: round_cents(r.final_amount),
                effective_annual_rate_pct: round_to(r.effective_annual_rate_pct, 2),
                ..r
            }),
        }
    }
}

impl From<SingleResult> for InvestmentResult {
    fn from(result: SingleResult) -> Self {
        InvestmentResult::Single(result)
    }
}

impl From<RecurringResult> for InvestmentResult {
    fn from(result: RecurringResult) -> Self {
        InvestmentResult::Recurring(result)
    }
}
