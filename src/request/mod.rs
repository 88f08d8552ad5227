//! Investment requests and batch loading

mod data;
pub mod loader;

pub use data::{AmountInput, InvestmentKind, InvestmentRequest};
pub use loader::{load_requests, load_requests_from_reader};
