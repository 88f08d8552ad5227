//! Month-by-month growth schedules backing charts and tables

use super::annuity::monthly_rate;
use super::results::round_cents;
use crate::request::InvestmentKind;
use serde::{Deserialize, Serialize};

/// One period of a growth schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthScheduleRow {
    /// 1-based period number
    pub period: u32,
    pub contribution_this_period: f64,
    pub cumulative_contributed: f64,
    pub interest_this_period: f64,
    pub cumulative_interest: f64,
    /// Balance at the end of the period
    pub balance: f64,
}

impl GrowthScheduleRow {
    /// Copy with every money column rounded to cents
    pub fn rounded(&self) -> Self {
        Self {
            period: self.period,
            contribution_this_period: round_cents(self.contribution_this_period),
            cumulative_contributed: round_cents(self.cumulative_contributed),
            interest_this_period: round_cents(self.interest_this_period),
            cumulative_interest: round_cents(self.cumulative_interest),
            balance: round_cents(self.balance),
        }
    }
}

/// Ledger for recurring contributions, one row per month.
///
/// Uses the same end-of-month timing as the annuity calculator: interest
/// accrues on the opening balance, then the month's contribution is added.
/// The last row's balance therefore matches `compute_recurring`'s final amount.
pub fn generate_recurring_schedule(
    monthly_contribution: f64,
    annual_rate_pct: f64,
    num_months: u32,
) -> Vec<GrowthScheduleRow> {
    let rate = monthly_rate(annual_rate_pct);
    let mut rows = Vec::with_capacity(num_months as usize);
    let mut balance = 0.0;

    for period in 1..=num_months {
        let interest = balance * rate;
        balance += interest + monthly_contribution;

        let cumulative_contributed = monthly_contribution * period as f64;
        rows.push(GrowthScheduleRow {
            period,
            contribution_this_period: monthly_contribution,
            cumulative_contributed,
            interest_this_period: interest,
            cumulative_interest: balance - cumulative_contributed,
            balance,
        });
    }

    rows
}

/// A single deposit has no month-by-month evolution: always empty
pub fn generate_single_schedule(_principal: f64, _annual_rate_pct: f64, _term_days: u32) -> Vec<GrowthScheduleRow> {
    Vec::new()
}

/// Schedule for either kind; `periods` is days for single, months for recurring
pub fn generate_schedule(
    kind: InvestmentKind,
    amount: f64,
    annual_rate_pct: f64,
    periods: u32,
) -> Vec<GrowthScheduleRow> {
    match kind {
        InvestmentKind::Single => generate_single_schedule(amount, annual_rate_pct, periods),
        InvestmentKind::Recurring => generate_recurring_schedule(amount, annual_rate_pct, periods),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::compute_recurring;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_row_count_and_periods() {
        let rows = generate_recurring_schedule(1000.0, 12.0, 24);
        assert_eq!(rows.len(), 24);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.period, i as u32 + 1);
            assert_eq!(row.cumulative_contributed, 1000.0 * (i + 1) as f64);
            assert_eq!(row.contribution_this_period, 1000.0);
        }
    }

    #[test]
    fn test_matches_closed_form() {
        for &(c, rate, n) in &[
            (1000.0, 12.0, 12),
            (250.0, 0.0, 7),
            (3333.33, 10.65, 120),
            (100.0, 15.0, 1),
            (1_000_000.0, 14.5, 120),
        ] {
            let rows = generate_recurring_schedule(c, rate, n);
            let closed = compute_recurring(c, rate, n).unwrap();
            let last = rows.last().unwrap();
            assert_abs_diff_eq!(last.balance, closed.final_amount, epsilon = 0.01);
            assert_abs_diff_eq!(last.cumulative_interest, closed.total_return, epsilon = 0.01);
        }
    }

    #[test]
    fn test_first_period_earns_no_interest() {
        let rows = generate_recurring_schedule(1000.0, 12.0, 3);
        assert_eq!(rows[0].interest_this_period, 0.0);
        assert_eq!(rows[0].balance, 1000.0);
        assert_abs_diff_eq!(rows[1].interest_this_period, 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(rows[1].balance, 2010.0, epsilon = 1e-9);
    }

    #[test]
    fn test_contribution_first_is_one_month_ahead() {
        // Crediting each contribution before interest would be an annuity-due
        let last = generate_recurring_schedule(1000.0, 12.0, 12)[11].balance;
        assert_abs_diff_eq!(last, 12_682.50, epsilon = 0.01);
        assert_abs_diff_eq!(last * 1.01, 12_809.33, epsilon = 0.01);
    }

    #[test]
    fn test_interest_columns_are_consistent() {
        let rows = generate_recurring_schedule(500.0, 9.0, 36);
        let summed: f64 = rows.iter().map(|r| r.interest_this_period).sum();
        assert_abs_diff_eq!(summed, rows[35].cumulative_interest, epsilon = 1e-6);
    }

    #[test]
    fn test_single_schedule_is_empty() {
        assert!(generate_single_schedule(10_000.0, 12.0, 365).is_empty());
        assert!(generate_schedule(InvestmentKind::Single, 10_000.0, 12.0, 365).is_empty());
        assert_eq!(generate_schedule(InvestmentKind::Recurring, 100.0, 12.0, 6).len(), 6);
    }

    #[test]
    fn test_zero_months() {
        assert!(generate_recurring_schedule(100.0, 12.0, 0).is_empty());
    }

    #[test]
    fn test_rounded_row() {
        let row = generate_recurring_schedule(1000.0, 12.0, 12)[11].rounded();
        assert_eq!(row.balance, 12_682.5);
        assert_eq!(row.period, 12);
    }
}
