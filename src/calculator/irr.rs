//! Internal Rate of Return (IRR) calculation
//!
//! Used to derive the true effective annual rate of recurring contributions

use crate::config::IrrSettings;

/// Lowest periodic rate the solver will consider (-99%)
const MIN_PERIODIC_RATE: f64 = -0.99;

/// Highest periodic rate the solver will consider (1000%)
const MAX_PERIODIC_RATE: f64 = 10.0;

/// Calculate the annual IRR for a series of evenly spaced cash flows.
///
/// # Arguments
/// * `cashflows` - Cash flows by period (positive = inflow, negative = outflow)
/// * `periods_per_year` - Number of periods per year (12 for monthly)
/// * `settings` - Seed, tolerance and iteration cap
///
/// # Returns
/// * `Option<f64>` - Annual IRR as a decimal (0.05 for 5%), or None if no root was found
pub fn calculate_irr(cashflows: &[f64], periods_per_year: u32, settings: &IrrSettings) -> Option<f64> {
    solve_periodic_rate(cashflows, settings).map(|rate| annualize(rate, periods_per_year))
}

/// Compound a periodic rate to an annual rate: (1 + r)^n - 1
pub fn annualize(periodic_rate: f64, periods_per_year: u32) -> f64 {
    (1.0 + periodic_rate).powi(periods_per_year as i32) - 1.0
}

/// Solve for the periodic rate that zeroes the NPV of `cashflows`.
///
/// Newton-Raphson from `settings.initial_guess`, falling back to bisection
/// when the derivative vanishes or Newton runs out of iterations. Both
/// loops are capped at `settings.max_iterations`.
pub fn solve_periodic_rate(cashflows: &[f64], settings: &IrrSettings) -> Option<f64> {
    if cashflows.is_empty() {
        return None;
    }

    if cashflows.iter().all(|&cf| cf.abs() < 1e-10) {
        return Some(0.0);
    }

    // At least one sign change is required for an IRR to exist
    let has_positive = cashflows.iter().any(|&cf| cf > 1e-10);
    let has_negative = cashflows.iter().any(|&cf| cf < -1e-10);
    if !has_positive || !has_negative {
        return None;
    }

    let mut rate = settings.initial_guess;

    for _ in 0..settings.max_iterations {
        let (npv, dnpv) = npv_and_derivative(cashflows, rate);

        if !npv.is_finite() || !dnpv.is_finite() || dnpv.abs() < 1e-20 {
            return solve_by_bisection(cashflows, settings);
        }

        let new_rate = (rate - npv / dnpv).clamp(MIN_PERIODIC_RATE, MAX_PERIODIC_RATE);

        if (new_rate - rate).abs() < settings.tolerance {
            return Some(new_rate);
        }

        rate = new_rate;
    }

    log::debug!("newton did not converge in {} iterations, trying bisection", settings.max_iterations);
    solve_by_bisection(cashflows, settings)
}

/// Calculate NPV and its derivative with respect to rate
fn npv_and_derivative(cashflows: &[f64], rate: f64) -> (f64, f64) {
    let mut npv = 0.0;
    let mut dnpv = 0.0;

    for (t, &cf) in cashflows.iter().enumerate() {
        let discount = (1.0 + rate).powi(t as i32);
        npv += cf / discount;
        if t > 0 {
            dnpv -= (t as f64) * cf / ((1.0 + rate).powi(t as i32 + 1));
        }
    }

    (npv, dnpv)
}

fn solve_by_bisection(cashflows: &[f64], settings: &IrrSettings) -> Option<f64> {
    let mut low = MIN_PERIODIC_RATE;
    let mut high = MAX_PERIODIC_RATE;
    let mut npv_low = npv_at_rate(cashflows, low);
    let npv_high = npv_at_rate(cashflows, high);

    // No root bracketed in this interval
    if npv_low * npv_high > 0.0 {
        return None;
    }

    for _ in 0..settings.max_iterations {
        let mid = (low + high) / 2.0;
        let npv_mid = npv_at_rate(cashflows, mid);

        if npv_mid.abs() < settings.tolerance || (high - low) / 2.0 < settings.tolerance {
            return Some(mid);
        }

        if npv_mid * npv_low < 0.0 {
            high = mid;
        } else {
            low = mid;
            npv_low = npv_mid;
        }
    }

    None
}

/// Calculate NPV at a given periodic rate
fn npv_at_rate(cashflows: &[f64], rate: f64) -> f64 {
    cashflows
        .iter()
        .enumerate()
        .map(|(t, &cf)| cf / (1.0 + rate).powi(t as i32))
        .sum()
}
