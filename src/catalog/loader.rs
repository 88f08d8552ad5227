//! Load the product catalog from JSON
//!
//! Expected shape (document order is kept):
//!
//! ```json
//! { "products": { "cetes": { "name": "CETES",
//!     "terms": { "28": { "annual_rate": 11.0, "name": "28 días" } } } } }
//! ```
//!
//! The Spanish keys `productos`, `nombre`, `plazos` and `tasa_anual` are
//! accepted as well.

use super::{ProductCatalog, ProductRecord, ProductTerm};
use crate::error::CatalogError;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct RawCatalog {
    #[serde(alias = "productos", default)]
    products: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct RawProduct {
    #[serde(alias = "nombre")]
    name: String,
    #[serde(alias = "descripcion", default)]
    description: Option<String>,
    #[serde(alias = "plazos", default)]
    terms: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct RawTerm {
    #[serde(alias = "tasa_anual")]
    annual_rate: f64,
    #[serde(alias = "nombre")]
    name: String,
}

impl RawProduct {
    fn into_record(self, id: String) -> ProductRecord {
        let mut terms = Vec::with_capacity(self.terms.len());

        for (key, value) in self.terms {
            let days: u32 = match key.trim().parse() {
                Ok(d) => d,
                Err(_) => {
                    log::warn!("product {}: skipping term with non-numeric key '{}'", id, key);
                    continue;
                }
            };
            match serde_json::from_value::<RawTerm>(value) {
                Ok(raw) if raw.annual_rate.is_finite() => {
                    terms.push(ProductTerm::new(days, raw.annual_rate, raw.name));
                }
                Ok(_) => log::warn!("product {}: skipping {}-day term with non-finite rate", id, days),
                Err(e) => log::warn!("product {}: skipping malformed {}-day term: {}", id, days, e),
            }
        }

        ProductRecord {
            id,
            name: self.name,
            description: self.description,
            terms,
        }
    }
}

/// Parse a catalog from a JSON string
pub fn parse_catalog(json: &str) -> Result<ProductCatalog, CatalogError> {
    let raw: RawCatalog = serde_json::from_str(json)?;
    build_catalog(raw)
}

/// Load a catalog from any reader
pub fn load_catalog_from_reader<R: std::io::Read>(reader: R) -> Result<ProductCatalog, CatalogError> {
    let raw: RawCatalog = serde_json::from_reader(reader)?;
    build_catalog(raw)
}

/// Load a catalog from a JSON file
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<ProductCatalog, CatalogError> {
    let file = File::open(path.as_ref())?;
    let catalog = load_catalog_from_reader(BufReader::new(file))?;
    log::info!("loaded {} products from {}", catalog.len(), path.as_ref().display());
    Ok(catalog)
}

fn build_catalog(raw: RawCatalog) -> Result<ProductCatalog, CatalogError> {
    let mut products = Vec::with_capacity(raw.products.len());
    for (id, value) in raw.products {
        let product: RawProduct = serde_json::from_value(value)?;
        products.push(product.into_record(id));
    }
    Ok(ProductCatalog::new(products))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "products": {
            "nu": {
                "name": "Nu Cajitas",
                "terms": {
                    "7": { "annual_rate": 14.5, "name": "7 días" },
                    "28": { "annual_rate": 15.0, "name": "28 días" }
                }
            },
            "cetes": {
                "name": "CETES",
                "description": "Certificados de la Tesorería",
                "terms": {
                    "182": { "annual_rate": 10.6, "name": "182 días" },
                    "28": { "annual_rate": 10.1, "name": "28 días" }
                }
            }
        }
    }"#;

    #[test]
    fn test_parse_keeps_document_order() {
        let catalog = parse_catalog(SAMPLE).unwrap();
        let ids: Vec<_> = catalog.products().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["nu", "cetes"]);

        let cetes = catalog.product("cetes").unwrap();
        let days: Vec<_> = cetes.terms.iter().map(|t| t.days).collect();
        assert_eq!(days, vec![182, 28]);
        assert_eq!(cetes.description.as_deref(), Some("Certificados de la Tesorería"));
    }

    #[test]
    fn test_parse_spanish_keys() {
        let json = r#"{"productos": {"gbm": {"nombre": "GBM Smart Cash",
            "plazos": {"1": {"tasa_anual": 10.0, "nombre": "Diario"}}}}}"#;
        let catalog = parse_catalog(json).unwrap();
        let gbm = catalog.product("gbm").unwrap();
        assert_eq!(gbm.name, "GBM Smart Cash");
        assert_eq!(gbm.term(1).unwrap().annual_rate_pct, 10.0);
    }

    #[test]
    fn test_malformed_terms_are_skipped() {
        let json = r#"{"products": {"p": {"name": "P", "terms": {
            "abc": {"annual_rate": 9.0, "name": "bad key"},
            "30": {"name": "missing rate"},
            "60": {"annual_rate": 8.0, "name": "ok"}
        }}}}"#;
        let catalog = parse_catalog(json).unwrap();
        let p = catalog.product("p").unwrap();
        assert_eq!(p.terms.len(), 1);
        assert_eq!(p.terms[0].days, 60);
    }

    #[test]
    fn test_empty_and_invalid_documents() {
        assert!(parse_catalog("{}").unwrap().is_empty());
        assert!(matches!(parse_catalog("not json"), Err(CatalogError::Parse(_))));
        assert!(matches!(load_catalog("does/not/exist.json"), Err(CatalogError::Io(_))));
    }

    #[test]
    fn test_load_default_catalog() {
        let catalog = load_catalog(crate::config::DEFAULT_CATALOG_PATH)
            .expect("Failed to load catalog");
        assert!(!catalog.is_empty());
        assert!(catalog.products().iter().all(|p| !p.terms.is_empty()));
    }
}
