//! Investment request structures

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether the investment is a single lump sum or a recurring monthly contribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InvestmentKind {
    /// One deposit held for the product term
    #[default]
    #[serde(rename = "single", alias = "simple")]
    Single,
    /// Fixed monthly contribution over a run of months
    #[serde(rename = "recurring", alias = "mensual")]
    Recurring,
}

impl InvestmentKind {
    /// Parse the names used in request files and query strings
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" | "simple" => Some(InvestmentKind::Single),
            "recurring" | "mensual" => Some(InvestmentKind::Recurring),
            _ => None,
        }
    }
}

impl fmt::Display for InvestmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvestmentKind::Single => f.pad("single"),
            InvestmentKind::Recurring => f.pad("recurring"),
        }
    }
}

/// Amount as received from the caller, before it is known to be numeric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(f64),
    Text(String),
}

impl AmountInput {
    /// The amount as a finite number, if it is one
    pub fn parse(&self) -> Option<f64> {
        let value = match self {
            AmountInput::Number(n) => *n,
            AmountInput::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

impl From<f64> for AmountInput {
    fn from(value: f64) -> Self {
        AmountInput::Number(value)
    }
}

impl From<&str> for AmountInput {
    fn from(value: &str) -> Self {
        AmountInput::Text(value.to_string())
    }
}

impl From<String> for AmountInput {
    fn from(value: String) -> Self {
        AmountInput::Text(value)
    }
}

/// A request to project one investment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentRequest {
    #[serde(alias = "producto_id")]
    pub product_id: String,

    /// Product term in days; selects the rate
    #[serde(alias = "plazo_dias")]
    pub term_days: i64,

    /// Lump sum (single) or monthly contribution (recurring)
    #[serde(alias = "monto")]
    pub amount: AmountInput,

    #[serde(default, alias = "tipo_inversion")]
    pub investment_kind: InvestmentKind,

    /// Months of contributions for recurring requests
    /// If None, derived from the term as `term_days / 30`
    #[serde(default, alias = "plazo_meses_corrida")]
    pub run_months: Option<i64>,
}

impl InvestmentRequest {
    pub fn single(product_id: impl Into<String>, term_days: i64, amount: impl Into<AmountInput>) -> Self {
        Self {
            product_id: product_id.into(),
            term_days,
            amount: amount.into(),
            investment_kind: InvestmentKind::Single,
            run_months: None,
        }
    }

    pub fn recurring(
        product_id: impl Into<String>,
        term_days: i64,
        amount: impl Into<AmountInput>,
        run_months: i64,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            term_days,
            amount: amount.into(),
            investment_kind: InvestmentKind::Recurring,
            run_months: Some(run_months),
        }
    }

    /// Run length in months, defaulting from the term
    pub fn resolved_run_months(&self) -> i64 {
        self.run_months.unwrap_or(self.term_days / 30)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_parsing() {
        assert_eq!(AmountInput::from(1500.0).parse(), Some(1500.0));
        assert_eq!(AmountInput::from(" 2500.50 ").parse(), Some(2500.5));
        assert_eq!(AmountInput::from("abc").parse(), None);
        assert_eq!(AmountInput::from("").parse(), None);
        assert_eq!(AmountInput::from(f64::NAN).parse(), None);
        assert_eq!(AmountInput::from("inf").parse(), None);
    }

    #[test]
    fn test_request_from_json() {
        let json = r#"{"product_id": "cetes", "term_days": 28, "amount": "10000"}"#;
        let req: InvestmentRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.investment_kind, InvestmentKind::Single);
        assert_eq!(req.amount.parse(), Some(10000.0));
        assert_eq!(req.run_months, None);
    }

    #[test]
    fn test_request_spanish_aliases() {
        let json = r#"{"producto_id": "nu", "plazo_dias": 90, "monto": 500,
            "tipo_inversion": "mensual", "plazo_meses_corrida": 12}"#;
        let req: InvestmentRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.investment_kind, InvestmentKind::Recurring);
        assert_eq!(req.resolved_run_months(), 12);
    }

    #[test]
    fn test_run_months_defaults_from_term() {
        let req = InvestmentRequest::single("cetes", 364, 1000.0);
        assert_eq!(req.resolved_run_months(), 12);
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!(InvestmentKind::parse("Recurring"), Some(InvestmentKind::Recurring));
        assert_eq!(InvestmentKind::parse("simple"), Some(InvestmentKind::Single));
        assert_eq!(InvestmentKind::parse("weekly"), None);
    }
}
