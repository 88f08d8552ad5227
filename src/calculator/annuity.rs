//! Ordinary annuity: fixed monthly contributions at a fixed rate
//!
//! Contributions are made at the end of each month, so the final month's
//! contribution earns no interest. The effective annual rate comes from the
//! IRR of the contribution flows, with a closed-form fallback when the
//! solver finds no root.

use super::irr;
use super::results::{EffectiveRateMethod, RecurringResult};
use crate::config::IrrSettings;
use crate::error::CalcError;

/// Longest run solved by IRR (100 years); longer runs use the closed form
const MAX_IRR_MONTHS: u32 = 1200;

/// Future value of `num_months` end-of-month contributions
///
/// `c * ((1+m)^n - 1) / m`, or `c * n` when the monthly rate is zero.
pub fn future_value(monthly_contribution: f64, monthly_rate: f64, num_months: u32) -> f64 {
    if monthly_rate == 0.0 {
        return monthly_contribution * num_months as f64;
    }
    monthly_contribution * ((1.0 + monthly_rate).powf(num_months as f64) - 1.0) / monthly_rate
}

/// Monthly rate from an annual percentage: 12 (%) -> 0.01
pub fn monthly_rate(annual_rate_pct: f64) -> f64 {
    (annual_rate_pct / 100.0) / 12.0
}

/// Calculator for recurring contributions
#[derive(Debug, Clone, Default)]
pub struct AnnuityCalculator {
    irr: IrrSettings,
}

impl AnnuityCalculator {
    pub fn new(irr: IrrSettings) -> Self {
        Self { irr }
    }

    /// Project `num_months` contributions of `monthly_contribution`
    pub fn compute(
        &self,
        monthly_contribution: f64,
        annual_rate_pct: f64,
        num_months: u32,
    ) -> Result<RecurringResult, CalcError> {
        if !monthly_contribution.is_finite() || monthly_contribution < 0.0 {
            return Err(CalcError::MalformedInput(format!(
                "monthly contribution must be a non-negative number, got {}",
                monthly_contribution
            )));
        }
        if !annual_rate_pct.is_finite() {
            return Err(CalcError::MalformedInput(format!(
                "annual rate must be a finite number, got {}",
                annual_rate_pct
            )));
        }
        if num_months == 0 {
            return Err(CalcError::MalformedInput("number of months must be positive".to_string()));
        }

        let rate = monthly_rate(annual_rate_pct);
        let final_amount = future_value(monthly_contribution, rate, num_months);
        let total_contributed = monthly_contribution * num_months as f64;
        let total_return = final_amount - total_contributed;

        let (effective_annual_rate_pct, effective_rate_method) =
            self.effective_annual_rate(monthly_contribution, num_months, final_amount);

        Ok(RecurringResult {
            monthly_contribution,
            annual_rate_pct,
            num_months,
            total_contributed,
            total_return,
            final_amount,
            effective_annual_rate_pct,
            effective_rate_method,
        })
    }

    fn effective_annual_rate(
        &self,
        monthly_contribution: f64,
        num_months: u32,
        final_amount: f64,
    ) -> (f64, EffectiveRateMethod) {
        if monthly_contribution > 0.0 && num_months <= MAX_IRR_MONTHS {
            let flows = contribution_cashflows(monthly_contribution, num_months, final_amount);
            if let Some(annual) = irr::calculate_irr(&flows, 12, &self.irr) {
                if annual.is_finite() {
                    return (annual * 100.0, EffectiveRateMethod::InternalRateOfReturn);
                }
            }
            log::debug!(
                "IRR did not converge for {} x {} months, using closed-form rate",
                monthly_contribution,
                num_months
            );
        }

        let total_contributed = monthly_contribution * num_months as f64;
        fallback_effective_rate(total_contributed, final_amount, num_months)
    }
}

/// Contribution flows: one outflow per month, the balance received with the last
fn contribution_cashflows(monthly_contribution: f64, num_months: u32, final_amount: f64) -> Vec<f64> {
    let mut flows = vec![-monthly_contribution; num_months as usize];
    if let Some(last) = flows.last_mut() {
        *last += final_amount;
    }
    flows
}

/// Closed-form effective rate when no IRR is available.
///
/// Runs shorter than a year scale the realized return linearly; a year or
/// longer annualizes the realized growth factor. Nothing contributed means
/// nothing earned.
fn fallback_effective_rate(total_contributed: f64, final_amount: f64, num_months: u32) -> (f64, EffectiveRateMethod) {
    let months = num_months as f64;

    if num_months < 12 {
        let rate = if total_contributed > 0.0 {
            (final_amount - total_contributed) / total_contributed * 100.0 * 12.0 / months
        } else {
            0.0
        };
        (rate, EffectiveRateMethod::SimpleExtrapolation)
    } else {
        let rate = if total_contributed > 0.0 {
            ((final_amount / total_contributed).powf(12.0 / months) - 1.0) * 100.0
        } else {
            0.0
        };
        (rate, EffectiveRateMethod::GrowthFactor)
    }
}

/// Project recurring contributions with the default solver settings
pub fn compute_recurring(
    monthly_contribution: f64,
    annual_rate_pct: f64,
    num_months: u32,
) -> Result<RecurringResult, CalcError> {
    AnnuityCalculator::default().compute(monthly_contribution, annual_rate_pct, num_months)
}
