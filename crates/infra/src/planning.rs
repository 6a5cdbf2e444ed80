//! Maintenance planning service.
//!
//! Composes the pure planning computations with document storage: fills in
//! configured defaults, stamps timestamps, picks a seed when the caller did not,
//! persists the result and logs one line per operation.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use chrono::{Datelike, NaiveDate, Utc};
use serde::Deserialize;
use thiserror::Error;

use transitplan_core::{AssetId, ConnectionId, DomainError, Entity, ReportId, ScheduleId};
use transitplan_maintenance::{
    Asset, AssetManagementConnection, ClimateFactors, ConditionObservation, ConnectionInput,
    InterventionOption, LifecycleCostAnalysis, LifecycleInput, MaintenanceReport,
    MaintenanceSchedule, MaintenanceTask, OptimizationRequest, PreventiveMaintenancePlan,
    ReplacementEvent, ReportInput, ResourceAvailability, ScheduleRequest, SyncOutcome,
    UsagePatterns, VoteType, connection, report,
};

use crate::config::{PlanningConfig, StorageBackend, StorageConfig};
use crate::repository::{InMemoryRepository, JsonFileRepository, Repository, RepositoryError};

#[derive(Debug, Error)]
pub enum PlanningError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("storage failure: {0}")]
    Storage(#[from] RepositoryError),
}

pub type PlanningResult<T> = Result<T, PlanningError>;

/// Request to project lifecycle costs for an asset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LifecycleCostCommand {
    pub asset: Asset,
    pub initial_cost: f64,
    pub lifespan_years: u32,
    #[serde(default)]
    pub annual_maintenance_costs: BTreeMap<String, f64>,
    #[serde(default)]
    pub replacement_schedule: Vec<ReplacementEvent>,
    /// Falls back to the configured default inflation rate.
    #[serde(default)]
    pub inflation_rate: Option<f64>,
    /// Calendar year of offset 0; defaults to the current year.
    #[serde(default)]
    pub base_year: Option<i32>,
}

/// Request to generate a maintenance schedule.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScheduleCommand {
    pub schedule_id: ScheduleId,
    pub asset: Asset,
    #[serde(default)]
    pub tasks: Vec<MaintenanceTask>,
    /// Defaults to today.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub horizon_years: Option<u32>,
    #[serde(default)]
    pub usage_patterns: UsagePatterns,
    #[serde(default)]
    pub climate_factors: ClimateFactors,
    #[serde(default)]
    pub resources: ResourceAvailability,
    /// Seed for date jitter; a random one is drawn (and stored) when absent.
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

/// Request to optimize preventive maintenance for an asset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PreventiveCommand {
    pub asset: Asset,
    pub history: Vec<ConditionObservation>,
    #[serde(default)]
    pub options: Vec<InterventionOption>,
    pub threshold: f64,
    #[serde(default)]
    pub projection_years: Option<u32>,
}

/// One vote on a community report.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VoteCommand {
    pub voter_id: String,
    #[serde(default)]
    pub vote_type: VoteType,
}

/// Document stores used by the planning service.
#[derive(Clone)]
pub struct PlanningStores {
    pub lifecycle: Arc<dyn Repository<AssetId, LifecycleCostAnalysis>>,
    pub schedules: Arc<dyn Repository<ScheduleId, MaintenanceSchedule>>,
    pub preventive: Arc<dyn Repository<AssetId, PreventiveMaintenancePlan>>,
    pub connections: Arc<dyn Repository<ConnectionId, AssetManagementConnection>>,
    pub reports: Arc<dyn Repository<ReportId, MaintenanceReport>>,
}

impl PlanningStores {
    pub fn in_memory() -> Self {
        Self {
            lifecycle: memory_store(),
            schedules: memory_store(),
            preventive: memory_store(),
            connections: memory_store(),
            reports: memory_store(),
        }
    }

    /// JSON file stores, one subdirectory per document kind.
    pub fn json_files(root: &Path) -> Result<Self, RepositoryError> {
        Ok(Self {
            lifecycle: file_store(root, "lifecycle_costs")?,
            schedules: file_store(root, "schedules")?,
            preventive: file_store(root, "preventive_plans")?,
            connections: file_store(root, "connections")?,
            reports: file_store(root, "reports")?,
        })
    }

    pub fn from_config(config: &StorageConfig) -> Result<Self, RepositoryError> {
        match config.backend {
            StorageBackend::Memory => Ok(Self::in_memory()),
            StorageBackend::File => Self::json_files(&config.data_dir),
        }
    }
}

fn memory_store<K, V>() -> Arc<dyn Repository<K, V>>
where
    InMemoryRepository<K, V>: Repository<K, V> + 'static,
{
    Arc::new(InMemoryRepository::<K, V>::new())
}

fn file_store<K, V>(root: &Path, dir: &str) -> Result<Arc<dyn Repository<K, V>>, RepositoryError>
where
    JsonFileRepository<K, V>: Repository<K, V> + 'static,
{
    let repo: JsonFileRepository<K, V> = JsonFileRepository::open(root.join(dir))?;
    Ok(Arc::new(repo))
}

pub struct MaintenancePlanningService {
    stores: PlanningStores,
    defaults: PlanningConfig,
    // Held across read-modify-write updates (votes, syncs).
    update_lock: Mutex<()>,
}

impl MaintenancePlanningService {
    pub fn new(stores: PlanningStores, defaults: PlanningConfig) -> Self {
        Self {
            stores,
            defaults,
            update_lock: Mutex::new(()),
        }
    }

    pub fn defaults(&self) -> &PlanningConfig {
        &self.defaults
    }

    // -------------------------
    // Lifecycle costs
    // -------------------------

    pub fn analyze_lifecycle(&self, cmd: LifecycleCostCommand) -> PlanningResult<LifecycleCostAnalysis> {
        let now = Utc::now();
        let base_year = cmd.base_year.unwrap_or_else(|| now.year());
        let input = LifecycleInput {
            initial_cost: cmd.initial_cost,
            lifespan_years: cmd.lifespan_years,
            annual_maintenance_costs: cmd.annual_maintenance_costs,
            replacement_schedule: cmd.replacement_schedule,
            inflation_rate: cmd.inflation_rate.unwrap_or(self.defaults.default_inflation_rate),
        };

        let limits = self.defaults.limits();
        let analysis = LifecycleCostAnalysis::compute(cmd.asset, input, base_year, &limits, now)?;
        self.stores
            .lifecycle
            .put(analysis.key(), analysis.clone())?;

        tracing::info!(
            asset_id = %analysis.asset.asset_id,
            lifespan_years = analysis.input.lifespan_years,
            total_lifecycle_cost = analysis.projection.summary.total_lifecycle_cost,
            skipped_replacements = analysis.projection.skipped_replacements.len(),
            "lifecycle cost analysis stored"
        );
        Ok(analysis)
    }

    pub fn lifecycle_analysis(&self, asset_id: &AssetId) -> PlanningResult<LifecycleCostAnalysis> {
        self.stores
            .lifecycle
            .get(asset_id)?
            .ok_or_else(|| not_found("lifecycle cost analysis", asset_id))
    }

    pub fn list_lifecycle_analyses(&self, category: Option<&str>) -> PlanningResult<Vec<LifecycleCostAnalysis>> {
        Ok(self
            .stores
            .lifecycle
            .list(&|a| category.is_none_or(|c| a.asset.category == c))?)
    }

    // -------------------------
    // Schedules
    // -------------------------

    pub fn generate_schedule(&self, cmd: ScheduleCommand) -> PlanningResult<MaintenanceSchedule> {
        let now = Utc::now();
        let today = now.date_naive();
        let request = ScheduleRequest {
            tasks: cmd.tasks,
            start_date: cmd.start_date.unwrap_or(today),
            horizon_years: cmd.horizon_years.unwrap_or(self.defaults.default_horizon_years),
            usage_patterns: cmd.usage_patterns,
            climate_factors: cmd.climate_factors,
            resources: cmd.resources,
            generated_on: today,
            rng_seed: cmd.rng_seed.unwrap_or_else(rand::random),
        };

        let limits = self.defaults.limits();
        let schedule =
            MaintenanceSchedule::compute(cmd.schedule_id, cmd.asset, request, &limits, now)?;
        self.stores
            .schedules
            .put(schedule.key(), schedule.clone())?;

        tracing::info!(
            schedule_id = %schedule.schedule_id,
            asset_id = %schedule.asset.asset_id,
            tasks = schedule.request.tasks.len(),
            events = schedule.events.len(),
            rng_seed = schedule.request.rng_seed,
            "maintenance schedule stored"
        );
        Ok(schedule)
    }

    pub fn schedule(&self, schedule_id: &ScheduleId) -> PlanningResult<MaintenanceSchedule> {
        self.stores
            .schedules
            .get(schedule_id)?
            .ok_or_else(|| not_found("maintenance schedule", schedule_id))
    }

    pub fn list_schedules(&self, asset_id: Option<&AssetId>) -> PlanningResult<Vec<MaintenanceSchedule>> {
        Ok(self
            .stores
            .schedules
            .list(&|s| asset_id.is_none_or(|id| &s.asset.asset_id == id))?)
    }

    // -------------------------
    // Preventive maintenance
    // -------------------------

    pub fn optimize_preventive(&self, cmd: PreventiveCommand) -> PlanningResult<PreventiveMaintenancePlan> {
        let now = Utc::now();
        let request = OptimizationRequest {
            asset: cmd.asset,
            history: cmd.history,
            options: cmd.options,
            threshold: cmd.threshold,
            projection_years: cmd
                .projection_years
                .unwrap_or(self.defaults.default_projection_years),
        };

        let plan = PreventiveMaintenancePlan::compute(
            request,
            self.defaults.optimizer_settings(),
            &self.defaults.limits(),
            now,
        )?;
        self.stores.preventive.put(plan.key(), plan.clone())?;

        tracing::info!(
            asset_id = %plan.request.asset.asset_id,
            rate_per_year = plan.outcome.deterioration.rate_per_year,
            fallback_used = plan.outcome.deterioration.fallback_used,
            interventions = plan.outcome.interventions.len(),
            total_cost = plan.outcome.metrics.total_maintenance_cost,
            "preventive maintenance plan stored"
        );
        Ok(plan)
    }

    pub fn preventive_plan(&self, asset_id: &AssetId) -> PlanningResult<PreventiveMaintenancePlan> {
        self.stores
            .preventive
            .get(asset_id)?
            .ok_or_else(|| not_found("preventive maintenance plan", asset_id))
    }

    // -------------------------
    // Asset management connections
    // -------------------------

    pub fn connect_system(&self, input: ConnectionInput) -> PlanningResult<AssetManagementConnection> {
        let conn = connection::configure(input, Utc::now())?;
        self.stores
            .connections
            .put(conn.key(), conn.clone())?;

        tracing::info!(
            connection_id = %conn.connection_id,
            system_name = %conn.system_name,
            sync_frequency_hours = conn.sync_frequency_hours,
            "asset management connection configured"
        );
        Ok(conn)
    }

    pub fn connection(&self, connection_id: &ConnectionId) -> PlanningResult<AssetManagementConnection> {
        self.stores
            .connections
            .get(connection_id)?
            .ok_or_else(|| not_found("asset management connection", connection_id))
    }

    pub fn record_connection_sync(
        &self,
        connection_id: &ConnectionId,
        outcome: SyncOutcome,
    ) -> PlanningResult<AssetManagementConnection> {
        let _guard = self.lock_updates()?;
        let mut conn = self.connection(connection_id)?;
        connection::record_sync(&mut conn, Utc::now(), outcome)?;
        self.stores
            .connections
            .put(conn.key(), conn.clone())?;

        tracing::info!(
            connection_id = %conn.connection_id,
            status = ?conn.status,
            next_scheduled_sync = %conn.next_scheduled_sync,
            "asset management sync recorded"
        );
        Ok(conn)
    }

    // -------------------------
    // Community reports
    // -------------------------

    pub fn submit_report(&self, input: ReportInput) -> PlanningResult<MaintenanceReport> {
        let submitted = report::submit(input, Utc::now())?;
        self.stores
            .reports
            .insert(submitted.key(), submitted.clone())
            .map_err(|e| match e {
                RepositoryError::AlreadyExists(id) => {
                    PlanningError::Domain(DomainError::conflict(format!("maintenance report {id} already exists")))
                }
                other => PlanningError::Storage(other),
            })?;

        tracing::info!(
            report_id = %submitted.report_id,
            asset_id = %submitted.asset_id,
            issue_type = %submitted.issue_type,
            severity = ?submitted.severity,
            "maintenance report submitted"
        );
        Ok(submitted)
    }

    pub fn report(&self, report_id: &ReportId) -> PlanningResult<MaintenanceReport> {
        self.stores
            .reports
            .get(report_id)?
            .ok_or_else(|| not_found("maintenance report", report_id))
    }

    pub fn list_reports(&self, asset_id: Option<&AssetId>) -> PlanningResult<Vec<MaintenanceReport>> {
        Ok(self
            .stores
            .reports
            .list(&|r| asset_id.is_none_or(|id| &r.asset_id == id))?)
    }

    pub fn vote_on_report(&self, report_id: &ReportId, cmd: VoteCommand) -> PlanningResult<MaintenanceReport> {
        let _guard = self.lock_updates()?;
        let mut updated = self.report(report_id)?;
        report::vote(&mut updated, &cmd.voter_id, cmd.vote_type, Utc::now())?;
        self.stores
            .reports
            .put(updated.key(), updated.clone())?;

        tracing::info!(
            report_id = %updated.report_id,
            voter_id = %cmd.voter_id,
            vote_type = ?cmd.vote_type,
            votes = updated.votes,
            "maintenance report vote recorded"
        );
        Ok(updated)
    }

    fn lock_updates(&self) -> PlanningResult<std::sync::MutexGuard<'_, ()>> {
        self.update_lock
            .lock()
            .map_err(|_| PlanningError::Storage(RepositoryError::LockPoisoned))
    }
}

fn not_found(kind: &str, id: &impl std::fmt::Display) -> PlanningError {
    PlanningError::Domain(DomainError::not_found(format!("{kind} {id}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use transitplan_maintenance::{Location, Priority, Severity};

    fn service() -> MaintenancePlanningService {
        MaintenancePlanningService::new(PlanningStores::in_memory(), PlanningConfig::default())
    }

    fn asset(id: &str, category: &str) -> Asset {
        Asset::new(AssetId::new(id).unwrap(), format!("Asset {id}"), category)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn lifecycle_cmd(id: &str, category: &str) -> LifecycleCostCommand {
        LifecycleCostCommand {
            asset: asset(id, category),
            initial_cost: 250_000.0,
            lifespan_years: 25,
            annual_maintenance_costs: BTreeMap::from([
                ("pavement_maintenance".to_string(), 5_000.0),
                ("signage_maintenance".to_string(), 1_500.0),
                ("striping_maintenance".to_string(), 3_500.0),
            ]),
            replacement_schedule: vec![ReplacementEvent {
                year_offset: 5,
                cost: 45_000.0,
                component: Some("restriping".to_string()),
            }],
            inflation_rate: None,
            base_year: Some(2025),
        }
    }

    fn report_input(id: &str, asset_id: &str) -> ReportInput {
        ReportInput {
            report_id: ReportId::new(id).unwrap(),
            asset_id: AssetId::new(asset_id).unwrap(),
            location: Location {
                latitude: 45.5,
                longitude: -122.6,
                address: None,
                intersection: Some("Oak & 5th".to_string()),
            },
            reporter_id: "resident-1".to_string(),
            issue_type: "signal_outage".to_string(),
            description: "Pedestrian signal dark".to_string(),
            severity: Severity::Critical,
            photos: vec![],
        }
    }

    #[test]
    fn lifecycle_uses_configured_inflation_and_is_retrievable() {
        let svc = service();
        let analysis = svc.analyze_lifecycle(lifecycle_cmd("BL-1", "bike_lane")).unwrap();
        assert_eq!(analysis.input.inflation_rate, 0.025);
        assert_eq!(analysis.projection.yearly_costs[0].year, 2025);

        let stored = svc.lifecycle_analysis(&AssetId::new("BL-1").unwrap()).unwrap();
        assert_eq!(stored, analysis);
    }

    #[test]
    fn lifecycle_list_filters_by_category() {
        let svc = service();
        svc.analyze_lifecycle(lifecycle_cmd("BL-1", "bike_lane")).unwrap();
        svc.analyze_lifecycle(lifecycle_cmd("BS-1", "bus_stop")).unwrap();
        svc.analyze_lifecycle(lifecycle_cmd("BL-2", "bike_lane")).unwrap();

        let lanes = svc.list_lifecycle_analyses(Some("bike_lane")).unwrap();
        let ids: Vec<_> = lanes.iter().map(|a| a.asset.asset_id.as_str()).collect();
        assert_eq!(ids, vec!["BL-1", "BL-2"]);
        assert_eq!(svc.list_lifecycle_analyses(None).unwrap().len(), 3);
    }

    #[test]
    fn invalid_lifecycle_input_is_not_stored() {
        let svc = service();
        let mut cmd = lifecycle_cmd("BL-1", "bike_lane");
        cmd.lifespan_years = 0;
        let err = svc.analyze_lifecycle(cmd).unwrap_err();
        assert!(matches!(
            err,
            PlanningError::Domain(DomainError::InvalidParameter { ref field, .. }) if field == "lifespan_years"
        ));
        assert!(matches!(
            svc.lifecycle_analysis(&AssetId::new("BL-1").unwrap()),
            Err(PlanningError::Domain(DomainError::NotFound(_)))
        ));
    }

    #[test]
    fn configured_limits_bound_request_sizes() {
        let defaults = PlanningConfig {
            max_lifespan_years: 20,
            ..PlanningConfig::default()
        };
        let svc = MaintenancePlanningService::new(PlanningStores::in_memory(), defaults);
        let err = svc.analyze_lifecycle(lifecycle_cmd("BL-1", "bike_lane")).unwrap_err();
        assert!(matches!(
            err,
            PlanningError::Domain(DomainError::InvalidParameter { ref field, .. }) if field == "lifespan_years"
        ));

        let mut cmd = lifecycle_cmd("BL-1", "bike_lane");
        cmd.lifespan_years = 20;
        assert!(svc.analyze_lifecycle(cmd).is_ok());
    }

    #[test]
    fn out_of_calendar_base_year_is_invalid() {
        let svc = service();
        let mut cmd = lifecycle_cmd("BL-1", "bike_lane");
        cmd.base_year = Some(i32::MAX);
        let err = svc.analyze_lifecycle(cmd).unwrap_err();
        assert!(matches!(
            err,
            PlanningError::Domain(DomainError::InvalidParameter { ref field, .. }) if field == "base_year"
        ));
    }

    #[test]
    fn schedule_records_drawn_seed_and_reproduces_with_it() {
        let svc = service();
        let cmd = ScheduleCommand {
            schedule_id: ScheduleId::new("SCH-1").unwrap(),
            asset: asset("BL-1", "bike_lane"),
            tasks: vec![MaintenanceTask {
                task_id: "sweep".to_string(),
                name: "Sweep lane".to_string(),
                base_frequency_days: 30,
                priority: Priority::High,
                duration_hours: 2.0,
                usage_sensitive: false,
                climate_sensitive: false,
                resource_requirements: BTreeMap::new(),
            }],
            start_date: Some(date(2025, 1, 1)),
            horizon_years: Some(1),
            usage_patterns: UsagePatterns::default(),
            climate_factors: ClimateFactors::default(),
            resources: ResourceAvailability::default(),
            rng_seed: None,
        };

        let first = svc.generate_schedule(cmd.clone()).unwrap();
        assert_eq!(first.events.len(), 12);

        let mut replay = cmd;
        replay.schedule_id = ScheduleId::new("SCH-2").unwrap();
        replay.rng_seed = Some(first.request.rng_seed);
        let second = svc.generate_schedule(replay).unwrap();
        assert_eq!(second.events, first.events);

        let listed = svc.list_schedules(Some(&AssetId::new("BL-1").unwrap())).unwrap();
        assert_eq!(listed.len(), 2);
        assert!(svc.list_schedules(Some(&AssetId::new("other").unwrap())).unwrap().is_empty());
    }

    #[test]
    fn preventive_plan_uses_configured_fallback_and_projection() {
        let defaults = PlanningConfig {
            fallback_deterioration_rate: 0.2,
            default_projection_years: 3,
            ..PlanningConfig::default()
        };
        let svc = MaintenancePlanningService::new(PlanningStores::in_memory(), defaults);
        let plan = svc
            .optimize_preventive(PreventiveCommand {
                asset: asset("SIG-7", "traffic_signal"),
                history: vec![ConditionObservation {
                    assessment_date: date(2024, 5, 1),
                    condition_score: 0.9,
                    assessor: None,
                }],
                options: vec![],
                threshold: 0.5,
                projection_years: None,
            })
            .unwrap();

        assert!(plan.outcome.deterioration.fallback_used);
        assert_eq!(plan.outcome.deterioration.rate_per_year, 0.2);
        assert_eq!(plan.outcome.predicted_conditions.len(), 3);
        assert_eq!(svc.preventive_plan(&AssetId::new("SIG-7").unwrap()).unwrap(), plan);
    }

    #[test]
    fn connection_sync_is_recorded() {
        let svc = service();
        let conn = svc
            .connect_system(ConnectionInput {
                connection_id: ConnectionId::new("CONN-1").unwrap(),
                system_name: "CityWorks".to_string(),
                connection_details: serde_json::Value::Null,
                asset_types: vec!["bike_lane".to_string()],
                sync_frequency_hours: 12,
            })
            .unwrap();
        assert!(conn.last_sync.is_none());

        let synced = svc
            .record_connection_sync(&conn.connection_id, SyncOutcome::Succeeded { assets_synced: 9 })
            .unwrap();
        assert_eq!(synced.sync_history.len(), 1);
        assert_eq!(svc.connection(&conn.connection_id).unwrap(), synced);
    }

    #[test]
    fn duplicate_report_is_a_conflict() {
        let svc = service();
        svc.submit_report(report_input("MR-1", "SIG-7")).unwrap();
        let err = svc.submit_report(report_input("MR-1", "SIG-7")).unwrap_err();
        assert!(matches!(err, PlanningError::Domain(DomainError::Conflict(_))));
    }

    #[test]
    fn votes_accumulate_on_stored_report() {
        let svc = service();
        svc.submit_report(report_input("MR-1", "SIG-7")).unwrap();
        let id = ReportId::new("MR-1").unwrap();
        for voter in ["a", "b"] {
            svc.vote_on_report(
                &id,
                VoteCommand {
                    voter_id: voter.to_string(),
                    vote_type: VoteType::Upvote,
                },
            )
            .unwrap();
        }
        assert_eq!(svc.report(&id).unwrap().votes, 3);

        let missing = svc.vote_on_report(
            &ReportId::new("MR-404").unwrap(),
            VoteCommand {
                voter_id: "a".to_string(),
                vote_type: VoteType::Downvote,
            },
        );
        assert!(matches!(missing, Err(PlanningError::Domain(DomainError::NotFound(_)))));
    }

    #[test]
    fn file_backed_stores_survive_a_new_service() {
        let dir = TempDir::new().unwrap();
        let svc = MaintenancePlanningService::new(
            PlanningStores::json_files(dir.path()).unwrap(),
            PlanningConfig::default(),
        );
        svc.submit_report(report_input("MR-1", "SIG-7")).unwrap();
        svc.submit_report(report_input("MR-2", "BL-1")).unwrap();

        let reopened = MaintenancePlanningService::new(
            PlanningStores::json_files(dir.path()).unwrap(),
            PlanningConfig::default(),
        );
        let for_signal = reopened
            .list_reports(Some(&AssetId::new("SIG-7").unwrap()))
            .unwrap();
        assert_eq!(for_signal.len(), 1);
        assert_eq!(for_signal[0].report_id.as_str(), "MR-1");
    }

    #[test]
    fn file_backed_analysis_reloads_at_full_precision() {
        let dir = TempDir::new().unwrap();
        let svc = MaintenancePlanningService::new(
            PlanningStores::json_files(dir.path()).unwrap(),
            PlanningConfig::default(),
        );
        let analysis = svc.analyze_lifecycle(lifecycle_cmd("BL-1", "bike_lane")).unwrap();
        assert_ne!(analysis.projection.yearly_costs[5].total_cost, 62_227.45);

        let reloaded = svc.lifecycle_analysis(&AssetId::new("BL-1").unwrap()).unwrap();
        assert_eq!(reloaded, analysis);
    }
}
