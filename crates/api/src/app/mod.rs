//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: storage and planning service wiring
//! - `routes/`: HTTP routes + handlers (one file per planning area)
//! - `dto.rs`: query/response DTOs and path parsing helpers
//! - `extract.rs`: JSON body extractor with structured rejections
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use transitplan_infra::{AppConfig, RepositoryError};

pub mod dto;
pub mod errors;
pub mod extract;
pub mod routes;
pub mod services;

/// Build the full HTTP router from configuration (public entrypoint used by `main.rs`).
pub fn build_app(config: &AppConfig) -> Result<Router, RepositoryError> {
    let services = services::build_services(config)?;
    Ok(build_app_with(Arc::new(services)))
}

/// Build the router around already-wired services.
pub fn build_app_with(services: Arc<services::AppServices>) -> Router {
    routes::router().layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .layer(Extension(services)),
    )
}
