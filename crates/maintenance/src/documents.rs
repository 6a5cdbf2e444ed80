//! Persisted planning documents.
//!
//! Each document keeps the inputs it was computed from next to the result, so a
//! stored analysis can be re-derived and audited later.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use transitplan_core::{AssetId, DomainResult, Entity, ScheduleId};

use crate::asset::Asset;
use crate::limits::PlanningLimits;
use crate::lifecycle::{self, LifecycleInput, LifecycleProjection};
use crate::preventive::{self, OptimizationOutcome, OptimizationRequest, OptimizerSettings};
use crate::rounding::Rounded;
use crate::schedule::{self, ScheduleRequest, ScheduledEvent};

/// Lifecycle cost analysis of one asset. Keyed by asset id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifecycleCostAnalysis {
    pub asset: Asset,
    pub base_year: i32,
    pub input: LifecycleInput,
    pub projection: LifecycleProjection,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl LifecycleCostAnalysis {
    pub fn compute(
        asset: Asset,
        input: LifecycleInput,
        base_year: i32,
        limits: &PlanningLimits,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        asset.validate()?;
        let projection = lifecycle::project(&input, base_year, limits)?;
        Ok(Self {
            asset,
            base_year,
            input,
            projection,
            created_at: now,
            last_updated: now,
        })
    }
}

impl Rounded for LifecycleCostAnalysis {
    fn rounded(self) -> Self {
        Self {
            projection: self.projection.rounded(),
            ..self
        }
    }
}

impl Entity for LifecycleCostAnalysis {
    type Id = AssetId;

    fn id(&self) -> &Self::Id {
        &self.asset.asset_id
    }
}

/// A generated maintenance schedule for one asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceSchedule {
    pub schedule_id: ScheduleId,
    pub asset: Asset,
    pub request: ScheduleRequest,
    pub events: Vec<ScheduledEvent>,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl MaintenanceSchedule {
    pub fn compute(
        schedule_id: ScheduleId,
        asset: Asset,
        request: ScheduleRequest,
        limits: &PlanningLimits,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        asset.validate()?;
        let events = schedule::generate(&request, limits)?;
        Ok(Self {
            schedule_id,
            asset,
            request,
            events,
            created_at: now,
            last_updated: now,
        })
    }
}

impl Entity for MaintenanceSchedule {
    type Id = ScheduleId;

    fn id(&self) -> &Self::Id {
        &self.schedule_id
    }
}

/// Preventive maintenance plan. Keyed by asset id; a new plan replaces the old one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreventiveMaintenancePlan {
    pub request: OptimizationRequest,
    pub settings: OptimizerSettings,
    pub outcome: OptimizationOutcome,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl PreventiveMaintenancePlan {
    pub fn compute(
        request: OptimizationRequest,
        settings: OptimizerSettings,
        limits: &PlanningLimits,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let outcome = preventive::optimize(&request, &settings, limits)?;
        Ok(Self {
            request,
            settings,
            outcome,
            created_at: now,
            last_updated: now,
        })
    }
}

impl Rounded for PreventiveMaintenancePlan {
    fn rounded(self) -> Self {
        Self {
            outcome: self.outcome.rounded(),
            ..self
        }
    }
}

impl Entity for PreventiveMaintenancePlan {
    type Id = AssetId;

    fn id(&self) -> &Self::Id {
        &self.request.asset.asset_id
    }
}
