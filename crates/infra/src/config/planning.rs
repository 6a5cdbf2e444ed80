//! Planning defaults

use serde::Deserialize;

use transitplan_maintenance::limits::{
    DEFAULT_MAX_HORIZON_YEARS, DEFAULT_MAX_LIFESPAN_YEARS, DEFAULT_MAX_PROJECTION_YEARS,
};
use transitplan_maintenance::preventive::DEFAULT_FALLBACK_DETERIORATION_RATE;
use transitplan_maintenance::{OptimizerSettings, PlanningLimits};

use super::error::ValidationError;

/// Defaults applied when a planning request leaves a parameter out.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct PlanningConfig {
    /// Annual deterioration assumed when condition history cannot support a trend.
    #[serde(default = "default_fallback_deterioration_rate")]
    pub fallback_deterioration_rate: f64,

    #[serde(default = "default_inflation_rate")]
    pub default_inflation_rate: f64,

    /// Schedule horizon in years.
    #[serde(default = "default_years")]
    pub default_horizon_years: u32,

    /// Preventive maintenance projection in years.
    #[serde(default = "default_years")]
    pub default_projection_years: u32,

    #[serde(default = "default_max_lifespan_years")]
    pub max_lifespan_years: u32,

    #[serde(default = "default_max_horizon_years")]
    pub max_horizon_years: u32,

    #[serde(default = "default_max_projection_years")]
    pub max_projection_years: u32,
}

impl PlanningConfig {
    pub fn optimizer_settings(&self) -> OptimizerSettings {
        OptimizerSettings {
            fallback_deterioration_rate: self.fallback_deterioration_rate,
        }
    }

    pub fn limits(&self) -> PlanningLimits {
        PlanningLimits {
            max_lifespan_years: self.max_lifespan_years,
            max_projection_years: self.max_projection_years,
            max_horizon_years: self.max_horizon_years,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        for (name, rate) in [
            ("fallback_deterioration_rate", self.fallback_deterioration_rate),
            ("default_inflation_rate", self.default_inflation_rate),
        ] {
            if !rate.is_finite() || rate < 0.0 {
                return Err(ValidationError::InvalidRate(name));
            }
        }
        if self.default_horizon_years == 0 {
            return Err(ValidationError::InvalidHorizon("default_horizon_years"));
        }
        if self.default_projection_years == 0 {
            return Err(ValidationError::InvalidHorizon("default_projection_years"));
        }
        for (name, max) in [
            ("max_lifespan_years", self.max_lifespan_years),
            ("max_horizon_years", self.max_horizon_years),
            ("max_projection_years", self.max_projection_years),
        ] {
            if max == 0 {
                return Err(ValidationError::InvalidHorizon(name));
            }
        }
        if self.default_horizon_years > self.max_horizon_years {
            return Err(ValidationError::DefaultAboveLimit("default_horizon_years"));
        }
        if self.default_projection_years > self.max_projection_years {
            return Err(ValidationError::DefaultAboveLimit("default_projection_years"));
        }
        Ok(())
    }
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            fallback_deterioration_rate: default_fallback_deterioration_rate(),
            default_inflation_rate: default_inflation_rate(),
            default_horizon_years: default_years(),
            default_projection_years: default_years(),
            max_lifespan_years: default_max_lifespan_years(),
            max_horizon_years: default_max_horizon_years(),
            max_projection_years: default_max_projection_years(),
        }
    }
}

fn default_fallback_deterioration_rate() -> f64 {
    DEFAULT_FALLBACK_DETERIORATION_RATE
}

fn default_inflation_rate() -> f64 {
    0.025
}

fn default_years() -> u32 {
    5
}

fn default_max_lifespan_years() -> u32 {
    DEFAULT_MAX_LIFESPAN_YEARS
}

fn default_max_horizon_years() -> u32 {
    DEFAULT_MAX_HORIZON_YEARS
}

fn default_max_projection_years() -> u32 {
    DEFAULT_MAX_PROJECTION_YEARS
}
