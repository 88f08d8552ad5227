//! Investment Projection - Return projections for fixed-term and recurring investments
//!
//! This library provides:
//! - Request validation against amount and term limits
//! - Simple-interest projections for single deposits
//! - Ordinary-annuity projections for monthly contributions, with IRR-based effective rates
//! - Month-by-month growth schedules
//! - Cross-product return rankings over an injected product catalog
//! - A runtime-neutral JSON API used by the Lambda handler

pub mod api;
pub mod calculator;
pub mod catalog;
pub mod comparison;
pub mod config;
pub mod error;
pub mod request;
pub mod service;
pub mod validation;

// Re-export commonly used types
pub use calculator::{
    compute_recurring, compute_single, generate_recurring_schedule, GrowthScheduleRow, InvestmentResult,
};
pub use catalog::{ProductCatalog, ProductRecord, ProductTerm};
pub use comparison::{rank_by_return, rank_nearest_term, ComparisonRow};
pub use config::EngineConfig;
pub use error::{CalcError, CatalogError, ServiceError};
pub use request::{AmountInput, InvestmentKind, InvestmentRequest};
pub use service::{CalculationResponse, InvestmentService};
pub use validation::{validate, ValidationOutcome, Validator};
