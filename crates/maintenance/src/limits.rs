//! Upper bounds on the year counts a single computation accepts.

use serde::{Deserialize, Serialize};

use transitplan_core::{DomainResult, error::ensure_at_most};

pub const DEFAULT_MAX_LIFESPAN_YEARS: u32 = 200;
pub const DEFAULT_MAX_PROJECTION_YEARS: u32 = 100;
pub const DEFAULT_MAX_HORIZON_YEARS: u32 = 50;

/// Largest `lifespan_years`, `projection_years` and `horizon_years` accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningLimits {
    pub max_lifespan_years: u32,
    pub max_projection_years: u32,
    pub max_horizon_years: u32,
}

impl Default for PlanningLimits {
    fn default() -> Self {
        Self {
            max_lifespan_years: DEFAULT_MAX_LIFESPAN_YEARS,
            max_projection_years: DEFAULT_MAX_PROJECTION_YEARS,
            max_horizon_years: DEFAULT_MAX_HORIZON_YEARS,
        }
    }
}

impl PlanningLimits {
    pub fn check_lifespan_years(&self, years: u32) -> DomainResult<()> {
        ensure_at_most("lifespan_years", years, self.max_lifespan_years)
    }

    pub fn check_projection_years(&self, years: u32) -> DomainResult<()> {
        ensure_at_most("projection_years", years, self.max_projection_years)
    }

    pub fn check_horizon_years(&self, years: u32) -> DomainResult<()> {
        ensure_at_most("horizon_years", years, self.max_horizon_years)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_accept_their_own_maximums() {
        let limits = PlanningLimits::default();
        assert!(limits.check_lifespan_years(200).is_ok());
        assert!(limits.check_projection_years(100).is_ok());
        assert!(limits.check_horizon_years(50).is_ok());
    }

    #[test]
    fn each_limit_names_its_field() {
        let limits = PlanningLimits::default();
        assert_eq!(
            limits.check_lifespan_years(u32::MAX).unwrap_err().field(),
            Some("lifespan_years")
        );
        assert_eq!(
            limits.check_projection_years(101).unwrap_err().field(),
            Some("projection_years")
        );
        assert_eq!(
            limits.check_horizon_years(51).unwrap_err().field(),
            Some("horizon_years")
        );
    }
}
