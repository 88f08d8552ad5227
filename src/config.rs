//! Engine configuration: validation limits and IRR solver settings

/// Default location of the product catalog
pub const DEFAULT_CATALOG_PATH: &str = "data/products.json";

/// Environment variable overriding the catalog location
pub const CATALOG_PATH_ENV: &str = "CATALOG_PATH";

/// Average days per month, used to express day-count terms in months
pub const DAYS_PER_MONTH: f64 = 30.44;

/// Day-count basis for simple interest
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Business limits applied before any calculation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationLimits {
    /// Minimum amount for any investment kind
    pub min_amount: f64,

    /// Maximum lump sum for a single contribution
    pub max_single_amount: f64,

    /// Maximum monthly contribution for recurring investments
    pub max_recurring_amount: f64,

    /// Shortest accepted term, in days
    pub min_term_days: i64,

    /// Longest accepted term, in days (10 years)
    pub max_term_days: i64,

    /// Shortest recurring run, in months
    pub min_run_months: i64,

    /// Currency code named in violation messages
    pub currency: String,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            min_amount: 100.0,
            max_single_amount: 50_000_000.0,
            max_recurring_amount: 1_000_000.0,
            min_term_days: 1,
            max_term_days: 3650,
            min_run_months: 1,
            currency: "MXN".to_string(),
        }
    }
}

impl ValidationLimits {
    /// Longest recurring run, in months: the default run of the longest term
    pub fn max_run_months(&self) -> i64 {
        self.max_term_days / 30
    }
}

/// Settings for the internal rate of return solve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IrrSettings {
    /// Starting periodic rate for Newton's method
    pub initial_guess: f64,

    /// Convergence tolerance on the periodic rate
    pub tolerance: f64,

    /// Iteration cap for each of Newton and bisection
    pub max_iterations: u32,
}

impl Default for IrrSettings {
    fn default() -> Self {
        Self {
            initial_guess: 0.01, // 1% per month
            tolerance: 1e-10,
            max_iterations: 100,
        }
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineConfig {
    pub limits: ValidationLimits,
    pub irr: IrrSettings,
}

/// Resolve the catalog path from the environment, falling back to the default
pub fn catalog_path_from_env() -> String {
    std::env::var(CATALOG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CATALOG_PATH.to_string())
}
