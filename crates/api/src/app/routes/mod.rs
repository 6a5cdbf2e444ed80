use axum::{routing::get, Router};

pub mod connections;
pub mod lifecycle;
pub mod preventive;
pub mod reports;
pub mod schedules;
pub mod system;

pub fn router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .nest("/lifecycle-cost", lifecycle::router())
        .nest("/maintenance-schedule", schedules::router())
        .nest("/preventive-maintenance", preventive::router())
        .nest("/asset-connections", connections::router())
        .nest("/maintenance-reports", reports::router())
}
