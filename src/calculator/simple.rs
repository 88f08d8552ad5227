//! Simple (non-compounding) interest on a single deposit over a day-count term

use super::results::{round_to, SingleResult};
use crate::config::{DAYS_PER_MONTH, DAYS_PER_YEAR};
use crate::error::CalcError;

/// Project a single lump-sum deposit.
///
/// `total_return = principal * rate/100 * term_days/365`. Interest is not
/// compounded within the term, so the nominal rate is also reported as the
/// effective annual rate. A zero-day term earns nothing.
pub fn compute_single(principal: f64, annual_rate_pct: f64, term_days: u32) -> Result<SingleResult, CalcError> {
    if !principal.is_finite() || principal < 0.0 {
        return Err(CalcError::MalformedInput(format!(
            "principal must be a non-negative number, got {}",
            principal
        )));
    }
    if !annual_rate_pct.is_finite() {
        return Err(CalcError::MalformedInput(format!(
            "annual rate must be a finite number, got {}",
            annual_rate_pct
        )));
    }

    let total_return = if term_days == 0 {
        0.0
    } else {
        principal * (annual_rate_pct / 100.0) * (term_days as f64 / DAYS_PER_YEAR)
    };

    Ok(SingleResult {
        principal,
        annual_rate_pct,
        term_days,
        term_months: round_to(term_days as f64 / DAYS_PER_MONTH, 1),
        total_return,
        final_amount: principal + total_return,
        effective_annual_rate_pct: annual_rate_pct,
    })
}
