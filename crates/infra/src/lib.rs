//! Infrastructure layer: document storage, configuration, planning service wiring.

pub mod config;
pub mod planning;
pub mod repository;

pub use config::AppConfig;
pub use planning::{MaintenancePlanningService, PlanningError, PlanningResult, PlanningStores};
pub use repository::{InMemoryRepository, JsonFileRepository, Repository, RepositoryError};
