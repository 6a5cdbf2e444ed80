//! Long-term maintenance planning domain module.
//!
//! This crate contains the planning computations (lifecycle costs, schedules,
//! preventive maintenance) and the state transitions of connections and
//! community reports, implemented purely as deterministic domain logic
//! (no IO, no HTTP, no storage, no clock: callers pass dates and seeds in).

pub mod asset;
pub mod connection;
pub mod documents;
pub mod lifecycle;
pub mod limits;
pub mod preventive;
pub mod report;
pub mod rounding;
pub mod schedule;

pub use asset::Asset;
pub use connection::{
    AssetManagementConnection, ConnectionInput, ConnectionStatus, SyncOutcome, SyncRecord,
};
pub use documents::{LifecycleCostAnalysis, MaintenanceSchedule, PreventiveMaintenancePlan};
pub use lifecycle::{
    CostYearEntry, LifecycleInput, LifecycleProjection, LifecycleSummary, ReplacementEvent,
};
pub use limits::PlanningLimits;
pub use preventive::{
    ConditionObservation, DeteriorationEstimate, Intervention, InterventionOption,
    OptimizationMetrics, OptimizationOutcome, OptimizationRequest, OptimizerSettings,
    PredictedCondition, ThresholdCrossing,
};
pub use report::{Location, MaintenanceReport, ReportInput, ReportStatus, Severity, VoteType};
pub use rounding::Rounded;
pub use schedule::{
    ClimateFactors, MaintenanceTask, Priority, ResourceAvailability, ScheduleRequest,
    ScheduledEvent, UsagePatterns,
};
