//! Request validation against business limits
//!
//! Runs before any calculator. Every rule is checked and all violations are
//! collected; only a non-numeric amount skips the remaining amount checks.

use crate::config::ValidationLimits;
use crate::request::{AmountInput, InvestmentKind, InvestmentRequest};
use serde::{Deserialize, Serialize};

/// Result of validating a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationOutcome {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

/// Checks request parameters against a set of limits
#[derive(Debug, Clone, Default)]
pub struct Validator {
    limits: ValidationLimits,
}

impl Validator {
    pub fn new(limits: ValidationLimits) -> Self {
        Self { limits }
    }

    /// Validate amount, term and product id for the given investment kind
    pub fn validate(
        &self,
        amount: &AmountInput,
        term_days: i64,
        product_id: &str,
        kind: InvestmentKind,
    ) -> ValidationOutcome {
        ValidationOutcome::from_errors(self.collect_errors(amount, term_days, product_id, kind))
    }

    /// Validate a full request, including the run length of recurring requests
    pub fn validate_request(&self, request: &InvestmentRequest) -> ValidationOutcome {
        let mut errors = self.collect_errors(
            &request.amount,
            request.term_days,
            &request.product_id,
            request.investment_kind,
        );

        if request.investment_kind == InvestmentKind::Recurring {
            let months = request.resolved_run_months();
            let max_months = self.limits.max_run_months();
            if months < self.limits.min_run_months || months > max_months {
                errors.push(format!(
                    "Run length must be between {} and {} months",
                    self.limits.min_run_months, max_months
                ));
            }
        }

        ValidationOutcome::from_errors(errors)
    }

    fn collect_errors(
        &self,
        amount: &AmountInput,
        term_days: i64,
        product_id: &str,
        kind: InvestmentKind,
    ) -> Vec<String> {
        let mut errors = Vec::new();

        match amount.parse() {
            None => errors.push("Amount must be a valid number".to_string()),
            Some(value) => {
                let (min, max) = self.amount_bounds(kind);
                if value < min || value > max {
                    errors.push(format!(
                        "Amount must be between ${} and ${} {}",
                        group_thousands(min),
                        group_thousands(max),
                        self.limits.currency
                    ));
                }
            }
        }

        if term_days < self.limits.min_term_days || term_days > self.limits.max_term_days {
            errors.push(format!(
                "Term must be between {} and {} days",
                self.limits.min_term_days, self.limits.max_term_days
            ));
        }

        if product_id.trim().is_empty() {
            errors.push("Product id is required".to_string());
        }

        errors
    }

    fn amount_bounds(&self, kind: InvestmentKind) -> (f64, f64) {
        match kind {
            InvestmentKind::Single => (self.limits.min_amount, self.limits.max_single_amount),
            InvestmentKind::Recurring => (self.limits.min_amount, self.limits.max_recurring_amount),
        }
    }
}

/// Validate with the default limits
pub fn validate(
    amount: &AmountInput,
    term_days: i64,
    product_id: &str,
    kind: InvestmentKind,
) -> ValidationOutcome {
    Validator::default().validate(amount, term_days, product_id, kind)
}

/// Format a whole-unit bound with comma thousands separators (50000000 -> 50,000,000)
fn group_thousands(value: f64) -> String {
    let digits = format!("{:.0}", value.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if value < 0.0 {
        out.insert(0, '-');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(amount: impl Into<AmountInput>, term_days: i64) -> ValidationOutcome {
        validate(&amount.into(), term_days, "cetes", InvestmentKind::Single)
    }

    #[test]
    fn test_single_amount_bounds() {
        assert!(!single(99.0, 28).is_valid);
        assert!(single(100.0, 28).is_valid);
        assert!(single(50_000_000.0, 28).is_valid);
        assert!(!single(50_000_000.01, 28).is_valid);
    }

    #[test]
    fn test_recurring_amount_bounds() {
        let check = |amount: f64| {
            validate(&amount.into(), 28, "nu", InvestmentKind::Recurring).is_valid
        };
        assert!(check(1_000_000.0));
        assert!(!check(1_000_001.0));
        assert!(!check(99.0));
    }

    #[test]
    fn test_term_bounds() {
        assert!(!single(1000.0, 0).is_valid);
        assert!(single(1000.0, 1).is_valid);
        assert!(single(1000.0, 3650).is_valid);
        assert!(!single(1000.0, 3651).is_valid);
        assert!(!single(1000.0, -5).is_valid);
    }

    #[test]
    fn test_bound_message_names_currency() {
        let outcome = single(99.0, 28);
        assert_eq!(outcome.errors, vec!["Amount must be between $100 and $50,000,000 MXN"]);
    }

    #[test]
    fn test_all_violations_collected() {
        let outcome = validate(&"abc".into(), 0, "  ", InvestmentKind::Single);
        assert!(!outcome.is_valid);
        assert_eq!(
            outcome.errors,
            vec![
                "Amount must be a valid number",
                "Term must be between 1 and 3650 days",
                "Product id is required",
            ]
        );
    }

    #[test]
    fn test_numeric_string_accepted() {
        assert!(single("2500", 91).is_valid);
    }

    #[test]
    fn test_run_months_checked_for_recurring() {
        let validator = Validator::default();

        let ok = InvestmentRequest::recurring("nu", 90, 500.0, 12);
        assert!(validator.validate_request(&ok).is_valid);

        let zero = InvestmentRequest::recurring("nu", 90, 500.0, 0);
        let outcome = validator.validate_request(&zero);
        assert_eq!(outcome.errors, vec!["Run length must be between 1 and 121 months"]);

        // Defaulted from a 7-day term: 7 / 30 = 0 months
        let mut short = InvestmentRequest::recurring("nu", 7, 500.0, 1);
        short.run_months = None;
        assert!(!validator.validate_request(&short).is_valid);

        // Single requests ignore the run length
        let single = InvestmentRequest::single("cetes", 7, 500.0);
        assert!(validator.validate_request(&single).is_valid);
    }

    #[test]
    fn test_longest_term_default_run_accepted() {
        let validator = Validator::default();

        // 3650 / 30 = 121 months
        let mut longest = InvestmentRequest::recurring("nu", 3650, 1000.0, 1);
        longest.run_months = None;
        assert_eq!(longest.resolved_run_months(), 121);
        assert!(validator.validate_request(&longest).is_valid);

        let too_long = InvestmentRequest::recurring("nu", 3650, 1000.0, 122);
        assert!(!validator.validate_request(&too_long).is_valid);
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(100.0), "100");
        assert_eq!(group_thousands(1_000.0), "1,000");
        assert_eq!(group_thousands(1_000_000.0), "1,000,000");
        assert_eq!(group_thousands(50_000_000.0), "50,000,000");
    }
}
