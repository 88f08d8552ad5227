//! Error types for catalog loading, calculation and the request pipeline

use thiserror::Error;

/// Rejection raised by a calculator when it receives input that should never
/// have passed validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("malformed input: {0}")]
    MalformedInput(String),
}

/// Failure to load the product catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failure to load a batch of requests from CSV
#[derive(Debug, Error)]
pub enum RequestLoadError {
    #[error("failed to read requests: {0}")]
    Csv(#[from] csv::Error),

    #[error("unknown investment kind '{0}' (expected 'single' or 'recurring')")]
    UnknownKind(String),
}

/// Why a calculation request was not answered
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ServiceError {
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("product not found: {0}")]
    ProductNotFound(String),

    #[error("term of {term_days} days not available for {product}")]
    TermNotAvailable { product: String, term_days: i64 },

    #[error(transparent)]
    Calculation(#[from] CalcError),
}
