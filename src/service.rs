//! Calculation pipeline over an injected product catalog
//!
//! Validates a request, resolves the product rate for the requested term,
//! runs the matching calculator and builds the growth schedule.
//!
//! # Example
//! ```ignore
//! let service = InvestmentService::from_path("data/products.json")?;
//!
//! let request = InvestmentRequest::recurring("nu", 90, 2_000.0, 24);
//! let response = service.calculate(&request)?;
//! println!("Final amount: {:.2}", response.result.final_amount());
//! ```

use crate::calculator::{
    compute_single, generate_recurring_schedule, generate_single_schedule, AnnuityCalculator,
    GrowthScheduleRow, InvestmentResult,
};
use crate::catalog::{load_catalog, ProductCatalog};
use crate::comparison::{rank_by_return, rank_nearest_term, ComparisonRow};
use crate::config::EngineConfig;
use crate::error::{CalcError, CatalogError, ServiceError};
use crate::request::{InvestmentKind, InvestmentRequest};
use crate::validation::Validator;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Product details echoed back with a calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub name: String,
    pub annual_rate_pct: f64,
    pub term_days: u32,
    pub term_name: String,
    /// Months of contributions (recurring only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_months: Option<u32>,
}

/// Everything the presentation layer needs for one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResponse {
    pub result: InvestmentResult,
    /// Empty for single deposits
    pub growth_schedule: Vec<GrowthScheduleRow>,
    pub product: ProductSummary,
}

impl CalculationResponse {
    /// Copy with money rounded to cents for display
    pub fn rounded(&self) -> Self {
        Self {
            result: self.result.rounded(),
            growth_schedule: self.growth_schedule.iter().map(GrowthScheduleRow::rounded).collect(),
            product: self.product.clone(),
        }
    }
}

/// Stateless calculation service; safe to share across threads
#[derive(Debug, Clone)]
pub struct InvestmentService {
    catalog: ProductCatalog,
    validator: Validator,
    annuity: AnnuityCalculator,
}

impl InvestmentService {
    /// Create a service over `catalog` with the given configuration
    pub fn new(catalog: ProductCatalog, config: EngineConfig) -> Self {
        Self {
            catalog,
            validator: Validator::new(config.limits),
            annuity: AnnuityCalculator::new(config.irr),
        }
    }

    /// Create a service with the default configuration
    pub fn with_catalog(catalog: ProductCatalog) -> Self {
        Self::new(catalog, EngineConfig::default())
    }

    /// Load the catalog from a JSON file and use the default configuration
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        Ok(Self::with_catalog(load_catalog(path)?))
    }

    pub fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    /// Run one request through validation, rate lookup and calculation
    pub fn calculate(&self, request: &InvestmentRequest) -> Result<CalculationResponse, ServiceError> {
        let outcome = self.validator.validate_request(request);
        if !outcome.is_valid {
            log::debug!("request for {} rejected: {:?}", request.product_id, outcome.errors);
            return Err(ServiceError::Validation(outcome.errors));
        }

        let amount = request
            .amount
            .parse()
            .ok_or_else(|| CalcError::MalformedInput("amount is not a number".to_string()))?;

        let product = self
            .catalog
            .product(&request.product_id)
            .ok_or_else(|| ServiceError::ProductNotFound(request.product_id.clone()))?;

        let term_not_available = || ServiceError::TermNotAvailable {
            product: product.name.clone(),
            term_days: request.term_days,
        };
        let term_days = u32::try_from(request.term_days).map_err(|_| term_not_available())?;
        let term = product.term(term_days).ok_or_else(term_not_available)?;

        let (result, growth_schedule, run_months) = match request.investment_kind {
            InvestmentKind::Single => {
                let result = compute_single(amount, term.annual_rate_pct, term_days)?;
                let schedule = generate_single_schedule(amount, term.annual_rate_pct, term_days);
                (InvestmentResult::Single(result), schedule, None)
            }
            InvestmentKind::Recurring => {
                let months = u32::try_from(request.resolved_run_months()).map_err(|_| {
                    CalcError::MalformedInput("run length must be a positive number of months".to_string())
                })?;
                let result = self.annuity.compute(amount, term.annual_rate_pct, months)?;
                let schedule = generate_recurring_schedule(amount, term.annual_rate_pct, months);
                (InvestmentResult::Recurring(result), schedule, Some(months))
            }
        };

        log::debug!(
            "{} {} at {}% for {} days: final amount {:.2}",
            request.investment_kind,
            product.id,
            term.annual_rate_pct,
            term_days,
            result.final_amount()
        );

        Ok(CalculationResponse {
            result,
            growth_schedule,
            product: ProductSummary {
                name: product.name.clone(),
                annual_rate_pct: term.annual_rate_pct,
                term_days,
                term_name: term.name.clone(),
                run_months,
            },
        })
    }

    /// Calculate many requests in parallel; results keep the input order
    pub fn calculate_batch(&self, requests: &[InvestmentRequest]) -> Vec<Result<CalculationResponse, ServiceError>> {
        requests.par_iter().map(|request| self.calculate(request)).collect()
    }

    /// Rank catalog products for a single deposit of `amount`
    ///
    /// With `term_days`, each product is priced on its nearest term only;
    /// otherwise every term of every product is ranked.
    pub fn compare(&self, amount: f64, term_days: Option<u32>) -> Vec<ComparisonRow> {
        match term_days {
            Some(days) => rank_nearest_term(amount, days, &self.catalog),
            None => rank_by_return(amount, &self.catalog),
        }
    }
}
