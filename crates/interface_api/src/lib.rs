//! HTTP API Layer
//!
//! This crate serves the rental extension's server functions over HTTP
//! using Axum. A caller posts `{"parameters": {...}}` to
//! `/functions/{name}` and receives `{"status": "SUCCESS", "response": ...}`,
//! where the response is the function's payload or `{"error": message}`.
//!
//! # Architecture
//!
//! - **Handlers**: Function dispatch and health probes
//! - **Middleware**: Request logging with the request id
//! - **DTOs**: Invocation envelope and health bodies
//! - **Error Handling**: Transport-level failures (unknown function, bad JSON)
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let crm: Arc<dyn CrmPort> = Arc::new(CrmRestAdapter::new(client));
//! let app = create_router(crm);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
    middleware as axum_middleware,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use domain_rental::{CrmPort, LocationSearchService, RentalAgreementCreator, VehicleSearchService};

use crate::handlers::{functions, health};
use crate::middleware::request_log_middleware;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub crm: Arc<dyn CrmPort>,
    pub vehicles: Arc<VehicleSearchService>,
    pub locations: Arc<LocationSearchService>,
    pub rentals: Arc<RentalAgreementCreator>,
}

impl AppState {
    /// Wires the services to one CRM port
    pub fn new(crm: Arc<dyn CrmPort>) -> Self {
        Self {
            vehicles: Arc::new(VehicleSearchService::new(crm.clone())),
            locations: Arc::new(LocationSearchService::new(crm.clone())),
            rentals: Arc::new(RentalAgreementCreator::new(crm.clone())),
            crm,
        }
    }
}

/// Creates the main router
///
/// # Arguments
///
/// * `crm` - The CRM port every server function runs against
pub fn create_router(crm: Arc<dyn CrmPort>) -> Router {
    let state = AppState::new(crm);

    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let function_routes = Router::new()
        .route("/functions/:name", post(functions::invoke_function))
        .layer(axum_middleware::from_fn(request_log_middleware));

    Router::new()
        .merge(public_routes)
        .merge(function_routes)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
