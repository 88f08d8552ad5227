//! Cross-product comparison of single-deposit returns
//!
//! Each (product, term) pair is priced with simple interest and the rows are
//! ranked by total return. The nominal rate is reported as the effective rate,
//! the same convention `compute_single` uses. A pair that cannot be priced is
//! logged and left out rather than failing the whole ranking.

use crate::calculator::{compute_single, SingleResult};
use crate::catalog::{ProductCatalog, ProductRecord, ProductTerm};
use crate::error::CalcError;
use serde::{Deserialize, Serialize};

/// One priced (product, term) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub product_id: String,
    pub product_name: String,
    pub term_days: u32,
    pub term_name: String,
    pub annual_rate_pct: f64,
    pub total_return: f64,
    pub final_amount: f64,
    pub effective_annual_rate_pct: f64,
}

impl ComparisonRow {
    fn new(product: &ProductRecord, term: &ProductTerm, result: SingleResult) -> Self {
        Self {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            term_days: term.days,
            term_name: term.name.clone(),
            annual_rate_pct: term.annual_rate_pct,
            total_return: result.total_return,
            final_amount: result.final_amount,
            effective_annual_rate_pct: result.effective_annual_rate_pct,
        }
    }
}

/// Price `amount` on every term of every product, best return first
pub fn rank_by_return(amount: f64, catalog: &ProductCatalog) -> Vec<ComparisonRow> {
    let mut rows = Vec::new();

    for product in catalog.products() {
        for term in &product.terms {
            if let Some(row) = price_pair(amount, product, term) {
                rows.push(row);
            }
        }
    }

    sort_by_return(&mut rows);
    rows
}

/// Price `amount` on each product's term nearest to `term_days`, best return first
pub fn rank_nearest_term(amount: f64, term_days: u32, catalog: &ProductCatalog) -> Vec<ComparisonRow> {
    let mut rows: Vec<ComparisonRow> = catalog
        .products()
        .iter()
        .filter_map(|product| {
            let term = product.nearest_term(term_days)?;
            price_pair(amount, product, term)
        })
        .collect();

    sort_by_return(&mut rows);
    rows
}

fn price_pair(amount: f64, product: &ProductRecord, term: &ProductTerm) -> Option<ComparisonRow> {
    match compute_single(amount, term.annual_rate_pct, term.days) {
        Ok(result) => Some(ComparisonRow::new(product, term, result)),
        Err(CalcError::MalformedInput(reason)) => {
            log::warn!("skipping {} ({} days): {}", product.id, term.days, reason);
            None
        }
    }
}

/// Descending by total return; `sort_by` is stable so ties keep catalog order
fn sort_by_return(rows: &mut [ComparisonRow]) {
    rows.sort_by(|a, b| b.total_return.total_cmp(&a.total_return));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> ProductCatalog {
        ProductCatalog::new(vec![
            ProductRecord::new(
                "low",
                "Low Yield",
                vec![ProductTerm::new(28, 8.0, "28 días"), ProductTerm::new(91, 8.5, "91 días")],
            ),
            ProductRecord::new(
                "high",
                "High Yield",
                vec![ProductTerm::new(28, 12.0, "28 días"), ProductTerm::new(182, 11.0, "182 días")],
            ),
        ])
    }

    #[test]
    fn test_higher_rate_ranks_first_at_equal_term() {
        let catalog = ProductCatalog::new(vec![
            ProductRecord::new("a", "A", vec![ProductTerm::new(90, 9.0, "90 días")]),
            ProductRecord::new("b", "B", vec![ProductTerm::new(90, 11.0, "90 días")]),
        ]);
        let rows = rank_by_return(10_000.0, &catalog);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].product_id, "b");
        assert_eq!(rows[1].product_id, "a");
    }

    #[test]
    fn test_all_terms_ranked_descending() {
        let rows = rank_by_return(10_000.0, &catalog());
        assert_eq!(rows.len(), 4);
        assert!(rows.windows(2).all(|w| w[0].total_return >= w[1].total_return));
        // 182 days at 11% beats everything shorter
        assert_eq!((rows[0].product_id.as_str(), rows[0].term_days), ("high", 182));
        assert_eq!(rows[0].effective_annual_rate_pct, 11.0);
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let catalog = ProductCatalog::new(vec![
            ProductRecord::new("first", "First", vec![ProductTerm::new(30, 10.0, "30")]),
            ProductRecord::new("second", "Second", vec![ProductTerm::new(30, 10.0, "30")]),
            ProductRecord::new("third", "Third", vec![ProductTerm::new(30, 10.0, "30")]),
        ]);
        let ids: Vec<_> = rank_by_return(5_000.0, &catalog)
            .into_iter()
            .map(|r| r.product_id)
            .collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_unpriceable_pair_is_skipped() {
        let catalog = ProductCatalog::new(vec![ProductRecord::new(
            "broken",
            "Broken",
            vec![ProductTerm::new(28, f64::NAN, "bad"), ProductTerm::new(91, 10.0, "ok")],
        )]);
        let rows = rank_by_return(1_000.0, &catalog);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].term_days, 91);
    }

    #[test]
    fn test_empty_catalog() {
        assert!(rank_by_return(1_000.0, &ProductCatalog::empty()).is_empty());
        assert!(rank_nearest_term(1_000.0, 30, &ProductCatalog::empty()).is_empty());
    }

    #[test]
    fn test_nearest_term_variant() {
        let rows = rank_nearest_term(10_000.0, 30, &catalog());
        assert_eq!(rows.len(), 2);
        // Both products resolve to their 28-day term; the 12% one wins
        assert_eq!(rows[0].product_id, "high");
        assert_eq!(rows[0].term_days, 28);
        assert_eq!(rows[1].product_id, "low");
        assert_eq!(rows[1].term_days, 28);
    }

    #[test]
    fn test_nearest_term_skips_products_without_terms() {
        let mut products = catalog().products().to_vec();
        products.push(ProductRecord::new("empty", "Empty", Vec::new()));
        let with_empty = ProductCatalog::new(products);
        assert_eq!(rank_nearest_term(10_000.0, 100, &with_empty).len(), 2);
    }
}
