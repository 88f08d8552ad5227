//! JSON API routes over the calculation service
//!
//! Routing is independent of the HTTP runtime: the Lambda binary converts
//! its request into an [`ApiRequest`] and the returned [`ApiResponse`] back.
//!
//! - `GET  /api/products`          full catalog
//! - `GET  /api/products/{id}`     one product
//! - `POST /api/calculate`         body: `InvestmentRequest`
//! - `GET  /api/compare?amount=X[&term_days=Y]`

use crate::calculator::round_cents;
use crate::error::ServiceError;
use crate::request::{AmountInput, InvestmentRequest};
use crate::service::InvestmentService;
use serde::Serialize;
use serde_json::json;
use std::collections::HashMap;

/// Runtime-neutral view of an HTTP request
#[derive(Debug, Clone, Default)]
pub struct ApiRequest {
    pub method: String,
    pub path: String,
    pub query: HashMap<String, String>,
    pub body: String,
}

/// Status code and JSON body
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    fn json<T: Serialize>(status: u16, value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(body) => Self { status, body },
            Err(e) => {
                log::error!("failed to serialize response: {}", e);
                Self::error(500, "Internal server error")
            }
        }
    }

    fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            body: json!({ "error": message }).to_string(),
        }
    }

    fn empty(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
        }
    }
}

/// Dispatch one request
pub fn route(service: &InvestmentService, request: &ApiRequest) -> ApiResponse {
    let path = request.path.trim_end_matches('/');
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match (request.method.as_str(), segments.as_slice()) {
        ("OPTIONS", _) => ApiResponse::empty(200),
        ("GET", ["api", "products"]) => list_products(service),
        ("GET", ["api", "products", id]) => get_product(service, id),
        ("POST", ["api", "calculate"]) => calculate(service, &request.body),
        ("GET", ["api", "compare"]) => compare(service, &request.query),
        _ => ApiResponse::error(404, "Not found"),
    }
}

fn list_products(service: &InvestmentService) -> ApiResponse {
    ApiResponse::json(200, &json!({ "products": service.catalog().products() }))
}

fn get_product(service: &InvestmentService, id: &str) -> ApiResponse {
    match service.catalog().product(id) {
        Some(product) => ApiResponse::json(200, product),
        None => ApiResponse::error(404, "Product not found"),
    }
}

fn calculate(service: &InvestmentService, body: &str) -> ApiResponse {
    let request: InvestmentRequest = match serde_json::from_str(body) {
        Ok(r) => r,
        Err(e) => {
            log::debug!("rejecting malformed request body: {}", e);
            return ApiResponse::error(400, "Invalid data");
        }
    };

    match service.calculate(&request) {
        Ok(response) => {
            log::info!("calculated {} for {}", request.investment_kind, request.product_id);
            ApiResponse::json(200, &response.rounded())
        }
        Err(ServiceError::Validation(errors)) => ApiResponse::json(400, &json!({ "error": errors })),
        Err(e) => ApiResponse::error(400, &e.to_string()),
    }
}

fn compare(service: &InvestmentService, query: &HashMap<String, String>) -> ApiResponse {
    let amount = match query.get("amount").and_then(|a| AmountInput::from(a.as_str()).parse()) {
        Some(a) if a >= 0.0 => a,
        _ => return ApiResponse::error(400, "amount must be a non-negative number"),
    };

    let term_days = match query.get("term_days") {
        None => None,
        Some(raw) => match raw.trim().parse::<u32>() {
            Ok(days) => Some(days),
            Err(_) => return ApiResponse::error(400, "term_days must be a whole number of days"),
        },
    };

    let mut rows = service.compare(amount, term_days);
    for row in &mut rows {
        row.total_return = round_cents(row.total_return);
        row.final_amount = round_cents(row.final_amount);
    }

    ApiResponse::json(200, &json!({ "amount": amount, "term_days": term_days, "rankings": rows }))
}
