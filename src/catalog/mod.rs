//! Product catalog: products, their terms and rates, and the JSON loader

mod data;
pub mod loader;

pub use data::{ProductCatalog, ProductRecord, ProductTerm};
pub use loader::{load_catalog, load_catalog_from_reader, parse_catalog};
