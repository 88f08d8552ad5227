//! Product catalog data structures

use serde::{Deserialize, Serialize};

/// One term offered by a product, with its annual rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductTerm {
    /// Term length in days
    pub days: u32,

    /// Annual rate in percent (12.5 = 12.5%/yr)
    pub annual_rate_pct: f64,

    /// Display name, e.g. "28 días"
    pub name: String,
}

impl ProductTerm {
    pub fn new(days: u32, annual_rate_pct: f64, name: impl Into<String>) -> Self {
        Self {
            days,
            annual_rate_pct,
            name: name.into(),
        }
    }
}

/// An investment product and its available terms, in catalog order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub terms: Vec<ProductTerm>,
}

impl ProductRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, terms: Vec<ProductTerm>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            terms,
        }
    }

    /// Exact term lookup by day count
    pub fn term(&self, days: u32) -> Option<&ProductTerm> {
        self.terms.iter().find(|t| t.days == days)
    }

    /// Term whose day count is closest to `days`; the first one wins on ties
    pub fn nearest_term(&self, days: u32) -> Option<&ProductTerm> {
        let mut best: Option<&ProductTerm> = None;
        for term in &self.terms {
            let distance = term.days.abs_diff(days);
            match best {
                Some(current) if current.days.abs_diff(days) <= distance => {}
                _ => best = Some(term),
            }
        }
        best
    }
}

/// Read-only set of products keyed by identifier
///
/// Built once by the loader and injected into the service; nothing in the
/// calculation path mutates it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductCatalog {
    products: Vec<ProductRecord>,
}

impl ProductCatalog {
    pub fn new(products: Vec<ProductRecord>) -> Self {
        Self { products }
    }

    /// Catalog with no products
    pub fn empty() -> Self {
        Self::default()
    }

    /// All products in catalog order
    pub fn products(&self) -> &[ProductRecord] {
        &self.products
    }

    pub fn product(&self, id: &str) -> Option<&ProductRecord> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
