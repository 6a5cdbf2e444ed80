//! Maintenance schedule generation.
//!
//! Expands recurring maintenance tasks into a flat, date-ordered list of events
//! over a fixed horizon. Frequencies are adjusted for usage intensity and season;
//! event dates receive a bounded jitter reflecting equipment availability.
//!
//! Jitter comes from a caller-supplied seed, so identical requests always yield
//! identical schedules (event ids included).

use std::collections::BTreeMap;

use chrono::{Datelike, Days, Months, NaiveDate};
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use transitplan_core::{
    DomainError, DomainResult, EventId,
    error::{ensure_in_range, ensure_non_negative, ensure_not_blank},
};

use crate::limits::PlanningLimits;

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// A recurring maintenance task (immutable input).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceTask {
    pub task_id: String,
    pub name: String,
    pub base_frequency_days: i64,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub duration_hours: f64,
    #[serde(default)]
    pub usage_sensitive: bool,
    #[serde(default)]
    pub climate_sensitive: bool,
    /// Crew, vehicles, materials, ... (free-form).
    #[serde(default)]
    pub resource_requirements: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UsagePatterns {
    pub weekday_intensity: f64,
    pub weekend_intensity: f64,
}

impl Default for UsagePatterns {
    fn default() -> Self {
        Self {
            weekday_intensity: 1.0,
            weekend_intensity: 0.7,
        }
    }
}

impl UsagePatterns {
    /// Week-weighted intensity: five weekday units and two weekend units.
    pub fn average_intensity(&self) -> f64 {
        (self.weekday_intensity * 5.0 + self.weekend_intensity * 2.0) / 7.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClimateFactors {
    pub winter_adjustment: f64,
    pub summer_adjustment: f64,
}

impl Default for ClimateFactors {
    fn default() -> Self {
        Self {
            winter_adjustment: 1.2,
            summer_adjustment: 0.9,
        }
    }
}

impl ClimateFactors {
    /// Seasonal multiplier for `month` (1-12, northern hemisphere seasons).
    pub fn adjustment_for_month(&self, month: u32) -> f64 {
        match month {
            12 | 1 | 2 => self.winter_adjustment,
            6..=8 => self.summer_adjustment,
            _ => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResourceAvailability {
    pub maintenance_crew_capacity: f64,
    /// Fraction of equipment available, in `[0, 1]`.
    pub equipment_availability: f64,
}

impl Default for ResourceAvailability {
    fn default() -> Self {
        Self {
            maintenance_crew_capacity: 100.0,
            equipment_availability: 0.8,
        }
    }
}

impl ResourceAvailability {
    /// Maximum number of days an event may be shifted either way.
    pub fn jitter_days(&self) -> i64 {
        (10.0 * (1.0 - self.equipment_availability)) as i64
    }
}

/// Inputs to [`generate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRequest {
    pub tasks: Vec<MaintenanceTask>,
    pub start_date: NaiveDate,
    pub horizon_years: u32,
    #[serde(default)]
    pub usage_patterns: UsagePatterns,
    #[serde(default)]
    pub climate_factors: ClimateFactors,
    #[serde(default)]
    pub resources: ResourceAvailability,
    /// Date the schedule is generated on; its month selects the seasonal factor.
    pub generated_on: NaiveDate,
    pub rng_seed: u64,
}

/// One generated maintenance event. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledEvent {
    pub event_id: EventId,
    pub task_id: String,
    pub task_name: String,
    pub scheduled_date: NaiveDate,
    pub priority: Priority,
    pub duration_hours: f64,
    #[serde(default)]
    pub resource_requirements: BTreeMap<String, serde_json::Value>,
}

impl MaintenanceTask {
    pub fn validate(&self, index: usize) -> DomainResult<()> {
        ensure_not_blank(&format!("tasks[{index}].task_id"), &self.task_id)?;
        if self.base_frequency_days <= 0 {
            return Err(DomainError::invalid_parameter(
                format!("tasks[{index}].base_frequency_days"),
                format!("must be > 0 (got {})", self.base_frequency_days),
            ));
        }
        ensure_non_negative(&format!("tasks[{index}].duration_hours"), self.duration_hours)
    }

    /// Recurrence interval in whole days after usage and seasonal adjustment.
    ///
    /// Fractional days are truncated; the interval never drops below one day.
    pub fn effective_frequency_days(
        &self,
        usage: &UsagePatterns,
        climate: &ClimateFactors,
        month: u32,
    ) -> i64 {
        let mut days = self.base_frequency_days as f64;
        if self.usage_sensitive {
            days /= usage.average_intensity();
        }
        if self.climate_sensitive {
            days *= climate.adjustment_for_month(month);
        }
        (days as i64).max(1)
    }
}

impl ScheduleRequest {
    pub fn validate(&self, limits: &PlanningLimits) -> DomainResult<()> {
        if self.horizon_years == 0 {
            return Err(DomainError::invalid_parameter(
                "horizon_years",
                "must be a positive number of years",
            ));
        }
        limits.check_horizon_years(self.horizon_years)?;
        ensure_non_negative("usage_patterns.weekday_intensity", self.usage_patterns.weekday_intensity)?;
        ensure_non_negative("usage_patterns.weekend_intensity", self.usage_patterns.weekend_intensity)?;
        if self.usage_patterns.average_intensity() <= 0.0 {
            return Err(DomainError::invalid_parameter(
                "usage_patterns",
                "average weekly intensity must be > 0",
            ));
        }
        for (field, value) in [
            ("climate_factors.winter_adjustment", self.climate_factors.winter_adjustment),
            ("climate_factors.summer_adjustment", self.climate_factors.summer_adjustment),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(DomainError::invalid_parameter(field, "must be > 0"));
            }
        }
        ensure_in_range(
            "resources.equipment_availability",
            self.resources.equipment_availability,
            0.0,
            1.0,
        )?;
        ensure_non_negative(
            "resources.maintenance_crew_capacity",
            self.resources.maintenance_crew_capacity,
        )?;
        for (i, task) in self.tasks.iter().enumerate() {
            task.validate(i)?;
        }
        Ok(())
    }

    /// Last date (inclusive) an event may nominally fall on.
    pub fn horizon_end(&self) -> DomainResult<NaiveDate> {
        self.start_date
            .checked_add_months(Months::new(self.horizon_years.saturating_mul(12)))
            .ok_or_else(|| {
                DomainError::invalid_parameter("horizon_years", "horizon exceeds the calendar range")
            })
    }
}

/// Generate the maintenance events for every task over the request horizon.
///
/// For each task the first occurrence is one effective interval after
/// `start_date`; occurrences continue while the nominal date is on or before
/// `start_date + horizon_years`. Each event date is shifted by a uniform jitter
/// in `[-m, m]` days (`m = trunc(10 × (1 − equipment_availability))`) without
/// moving later nominal dates. The combined list is sorted by date; ties keep
/// task order.
pub fn generate(
    request: &ScheduleRequest,
    limits: &PlanningLimits,
) -> DomainResult<Vec<ScheduledEvent>> {
    request.validate(limits)?;

    let end = request.horizon_end()?;
    let month = request.generated_on.month();
    let jitter = request.resources.jitter_days();
    let mut rng = StdRng::seed_from_u64(request.rng_seed);

    let mut events = Vec::new();
    for task in &request.tasks {
        let step = task.effective_frequency_days(
            &request.usage_patterns,
            &request.climate_factors,
            month,
        );

        let mut nominal = request.start_date;
        loop {
            nominal = match nominal.checked_add_days(Days::new(step as u64)) {
                Some(next) if next <= end => next,
                _ => break,
            };

            let offset = if jitter > 0 {
                rng.gen_range(-jitter..=jitter)
            } else {
                0
            };
            let scheduled_date = shift_days(nominal, offset).ok_or_else(|| {
                DomainError::invalid_parameter("start_date", "schedule exceeds the calendar range")
            })?;

            events.push(ScheduledEvent {
                event_id: EventId::from_random_bytes(rng.r#gen()),
                task_id: task.task_id.clone(),
                task_name: task.name.clone(),
                scheduled_date,
                priority: task.priority,
                duration_hours: task.duration_hours,
                resource_requirements: task.resource_requirements.clone(),
            });
        }
    }

    events.sort_by_key(|e| e.scheduled_date);
    Ok(events)
}

/// Shift `date` by a signed number of days.
pub(crate) fn shift_days(date: NaiveDate, offset: i64) -> Option<NaiveDate> {
    if offset >= 0 {
        date.checked_add_days(Days::new(offset as u64))
    } else {
        date.checked_sub_days(Days::new(offset.unsigned_abs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn task(id: &str, frequency: i64) -> MaintenanceTask {
        MaintenanceTask {
            task_id: id.to_string(),
            name: format!("{id} task"),
            base_frequency_days: frequency,
            priority: Priority::Medium,
            duration_hours: 2.0,
            usage_sensitive: false,
            climate_sensitive: false,
            resource_requirements: BTreeMap::new(),
        }
    }

    fn limits() -> PlanningLimits {
        PlanningLimits::default()
    }

    fn request(tasks: Vec<MaintenanceTask>) -> ScheduleRequest {
        ScheduleRequest {
            tasks,
            start_date: date(2024, 3, 1),
            horizon_years: 1,
            usage_patterns: UsagePatterns::default(),
            climate_factors: ClimateFactors::default(),
            resources: ResourceAvailability {
                maintenance_crew_capacity: 100.0,
                equipment_availability: 1.0,
            },
            generated_on: date(2024, 4, 10),
            rng_seed: 42,
        }
    }

    #[test]
    fn monthly_task_without_jitter_yields_twelve_evenly_spaced_events() {
        let events = generate(&request(vec![task("sweep", 30)]), &limits()).unwrap();

        assert_eq!(events.len(), 12);
        assert_eq!(events[0].scheduled_date, date(2024, 3, 31));
        for pair in events.windows(2) {
            assert_eq!((pair[1].scheduled_date - pair[0].scheduled_date).num_days(), 30);
        }
    }

    #[test]
    fn same_seed_reproduces_identical_schedule() {
        let mut req = request(vec![task("a", 14), task("b", 45)]);
        req.resources.equipment_availability = 0.4;
        req.horizon_years = 3;

        let first = serde_json::to_string(&generate(&req, &limits()).unwrap()).unwrap();
        let second = serde_json::to_string(&generate(&req, &limits()).unwrap()).unwrap();
        assert_eq!(first, second);

        req.rng_seed = 43;
        let other = serde_json::to_string(&generate(&req, &limits()).unwrap()).unwrap();
        assert_ne!(first, other);
    }

    #[test]
    fn events_are_sorted_across_tasks() {
        let events = generate(&request(vec![task("slow", 90), task("fast", 7)]), &limits()).unwrap();
        assert!(events.windows(2).all(|p| p[0].scheduled_date <= p[1].scheduled_date));
        assert!(events.iter().any(|e| e.task_id == "slow"));
        assert!(events.iter().any(|e| e.task_id == "fast"));
    }

    #[test]
    fn usage_sensitivity_divides_by_weighted_intensity() {
        let mut t = task("debris", 14);
        t.usage_sensitive = true;
        let usage = UsagePatterns {
            weekday_intensity: 1.2,
            weekend_intensity: 0.8,
        };
        // (1.2*5 + 0.8*2) / 7 = 1.0857..., 14 / 1.0857 = 12.89 -> 12
        assert_eq!(t.effective_frequency_days(&usage, &ClimateFactors::default(), 4), 12);
    }

    #[test]
    fn climate_sensitivity_uses_generation_month() {
        let mut t = task("inspect", 90);
        t.climate_sensitive = true;
        let climate = ClimateFactors {
            winter_adjustment: 1.3,
            summer_adjustment: 0.9,
        };
        let usage = UsagePatterns::default();
        assert_eq!(t.effective_frequency_days(&usage, &climate, 1), 117);
        assert_eq!(t.effective_frequency_days(&usage, &climate, 12), 117);
        assert_eq!(t.effective_frequency_days(&usage, &climate, 7), 81);
        assert_eq!(t.effective_frequency_days(&usage, &climate, 4), 90);
    }

    #[test]
    fn effective_frequency_never_drops_below_one_day() {
        let mut t = task("tiny", 1);
        t.usage_sensitive = true;
        let usage = UsagePatterns {
            weekday_intensity: 10.0,
            weekend_intensity: 10.0,
        };
        assert_eq!(t.effective_frequency_days(&usage, &ClimateFactors::default(), 4), 1);
    }

    #[test]
    fn jitter_stays_within_bounds() {
        let mut req = request(vec![task("a", 30)]);
        req.resources.equipment_availability = 0.5;
        assert_eq!(req.resources.jitter_days(), 5);

        let events = generate(&req, &limits()).unwrap();
        for (i, event) in events.iter().enumerate() {
            let nominal = req.start_date + chrono::Duration::days(30 * (i as i64 + 1));
            assert!((event.scheduled_date - nominal).num_days().abs() <= 5);
        }
    }

    #[test]
    fn zero_tasks_yield_empty_schedule() {
        assert!(generate(&request(vec![]), &limits()).unwrap().is_empty());
    }

    #[test]
    fn non_positive_frequency_is_invalid() {
        let err = generate(&request(vec![task("ok", 10), task("bad", 0)]), &limits()).unwrap_err();
        assert_eq!(err.field(), Some("tasks[1].base_frequency_days"));

        let err = generate(&request(vec![task("neg", -3)]), &limits()).unwrap_err();
        assert_eq!(err.field(), Some("tasks[0].base_frequency_days"));
    }

    #[test]
    fn availability_outside_unit_interval_is_invalid() {
        let mut req = request(vec![task("a", 30)]);
        req.resources.equipment_availability = 1.5;
        assert_eq!(
            generate(&req, &limits()).unwrap_err().field(),
            Some("resources.equipment_availability")
        );
    }

    #[test]
    fn zero_horizon_is_invalid() {
        let mut req = request(vec![task("a", 30)]);
        req.horizon_years = 0;
        assert_eq!(generate(&req, &limits()).unwrap_err().field(), Some("horizon_years"));
    }

    #[test]
    fn horizon_above_the_limit_is_rejected() {
        let mut req = request(vec![task("daily", 1)]);
        req.horizon_years = 200_000;
        assert_eq!(
            generate(&req, &limits()).unwrap_err().field(),
            Some("horizon_years")
        );

        req.horizon_years = 50;
        assert!(generate(&req, &limits()).is_ok());

        let tight = PlanningLimits {
            max_horizon_years: 10,
            ..limits()
        };
        assert_eq!(
            generate(&req, &tight).unwrap_err().field(),
            Some("horizon_years")
        );
    }

    #[test]
    fn event_ids_are_unique() {
        let mut req = request(vec![task("a", 3), task("b", 5)]);
        req.resources.equipment_availability = 0.7;
        let events = generate(&req, &limits()).unwrap();
        let ids: std::collections::HashSet<_> = events.iter().map(|e| e.event_id).collect();
        assert_eq!(ids.len(), events.len());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        })]

        /// Property: generation is a pure function of its inputs and seed, and the
        /// output is always date-ordered.
        #[test]
        fn deterministic_and_ordered(
            frequencies in prop::collection::vec(7i64..400, 0..5),
            availability in 0.0f64..=1.0,
            horizon in 1u32..6,
            seed in any::<u64>(),
        ) {
            let tasks = frequencies
                .iter()
                .enumerate()
                .map(|(i, f)| task(&format!("t{i}"), *f))
                .collect();
            let mut req = request(tasks);
            req.resources.equipment_availability = availability;
            req.horizon_years = horizon;
            req.rng_seed = seed;

            let a = generate(&req, &limits()).unwrap();
            let b = generate(&req, &limits()).unwrap();
            prop_assert_eq!(&a, &b);
            prop_assert!(a.windows(2).all(|p| p[0].scheduled_date <= p[1].scheduled_date));
        }
    }
}
