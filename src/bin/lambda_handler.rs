//! AWS Lambda handler for the investment projection API
//!
//! Loads the product catalog once at cold start (from `CATALOG_PATH`, default
//! `data/products.json`) and serves the JSON routes defined in `api::route`.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use investment_projection::{
    api::{route, ApiRequest, ApiResponse},
    config::catalog_path_from_env,
    InvestmentService,
};
use lambda_http::{run, service_fn, Body, Error, Request, RequestExt, Response};
use std::sync::Arc;

fn to_api_request(event: &Request) -> ApiRequest {
    let body = match event.body() {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => String::new(),
    };

    ApiRequest {
        method: event.method().as_str().to_string(),
        path: event.uri().path().to_string(),
        query: event
            .query_string_parameters()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        body,
    }
}

fn to_lambda_response(response: ApiResponse) -> Result<Response<Body>, Error> {
    let body = if response.body.is_empty() {
        Body::Empty
    } else {
        Body::Text(response.body)
    };

    Ok(Response::builder()
        .status(response.status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "GET, POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
        .body(body)?)
}

/// Lambda handler function
async fn handler(service: &InvestmentService, event: Request) -> Result<Response<Body>, Error> {
    let start = std::time::Instant::now();
    let request = to_api_request(&event);

    let response = route(service, &request);
    log::info!(
        "{} {} -> {} in {:?}",
        request.method,
        request.path,
        response.status,
        start.elapsed()
    );

    to_lambda_response(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let catalog_path = catalog_path_from_env();
    let service = Arc::new(InvestmentService::from_path(&catalog_path)?);
    if service.catalog().is_empty() {
        log::warn!("catalog at {} has no products", catalog_path);
    }

    run(service_fn(move |event: Request| {
        let service = Arc::clone(&service);
        async move { handler(&service, event).await }
    }))
    .await
}
