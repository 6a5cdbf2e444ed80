use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::Response;

use transitplan_infra::{
    AppConfig, MaintenancePlanningService, PlanningStores, RepositoryError,
    config::PlanningConfig, planning::PlanningResult,
};

use crate::app::errors;

/// Everything the HTTP handlers need, shared behind an `Arc`.
pub struct AppServices {
    pub planning: MaintenancePlanningService,
}

impl AppServices {
    /// In-memory stores with the given planning defaults (tests/dev).
    pub fn in_memory(defaults: PlanningConfig) -> Self {
        Self {
            planning: MaintenancePlanningService::new(PlanningStores::in_memory(), defaults),
        }
    }

    /// Run a planning call on tokio's blocking pool.
    ///
    /// Store access takes a mutex and may touch the filesystem, and the
    /// projections are CPU bound; none of it belongs on an async worker.
    pub async fn run<T, F>(self: Arc<Self>, call: F) -> Result<T, Response>
    where
        F: FnOnce(&MaintenancePlanningService) -> PlanningResult<T> + Send + 'static,
        T: Send + 'static,
    {
        match tokio::task::spawn_blocking(move || call(&self.planning)).await {
            Ok(result) => result.map_err(errors::planning_error_to_response),
            Err(e) => {
                tracing::error!("planning task failed: {e}");
                Err(errors::json_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "planning task failed",
                ))
            }
        }
    }
}

/// Wire storage and the planning service from configuration.
pub fn build_services(config: &AppConfig) -> Result<AppServices, RepositoryError> {
    let stores = PlanningStores::from_config(&config.storage)?;
    tracing::info!(
        backend = ?config.storage.backend,
        data_dir = %config.storage.data_dir.display(),
        "planning stores ready"
    );
    Ok(AppServices {
        planning: MaintenancePlanningService::new(stores, config.planning),
    })
}
