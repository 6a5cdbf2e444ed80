//! Application configuration.
//!
//! Loaded from environment variables with the `TRANSITPLAN` prefix using the
//! `config` and `dotenvy` crates; nested values are separated by `__`. Every
//! value has a default, so an empty environment yields a runnable in-memory
//! service.
//!
//! - `TRANSITPLAN__SERVER__PORT=9000` -> `server.port = 9000`
//! - `TRANSITPLAN__STORAGE__BACKEND=file` -> `storage.backend = file`
//! - `TRANSITPLAN__PLANNING__DEFAULT_INFLATION_RATE=0.03`
//! - `TRANSITPLAN__PLANNING__MAX_LIFESPAN_YEARS=150`

mod error;
mod planning;
mod server;
mod storage;

pub use error::{ConfigError, ValidationError};
pub use planning::PlanningConfig;
pub use server::ServerConfig;
pub use storage::{StorageBackend, StorageConfig};

use serde::Deserialize;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "TRANSITPLAN";

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub planning: PlanningConfig,
}

impl AppConfig {
    /// Load configuration from the environment (after reading `.env`, if present).
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Load and validate in one step.
    pub fn load_validated() -> Result<Self, ConfigError> {
        let config = Self::load()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.storage.validate()?;
        self.planning.validate()?;
        Ok(())
    }
}
