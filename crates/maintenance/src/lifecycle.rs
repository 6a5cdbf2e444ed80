//! Lifecycle cost projection.
//!
//! Projects the full cost of an asset over its lifespan: inflation-adjusted
//! annual maintenance plus discrete replacement events, one row per year.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use transitplan_core::{DomainError, DomainResult, error::ensure_non_negative};

use crate::limits::PlanningLimits;
use crate::rounding::{Rounded, round2};

/// A major replacement scheduled at a year offset from the start of service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplacementEvent {
    pub year_offset: i64,
    /// Cost in today's money (inflation is applied by the projector).
    pub cost: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
}

/// Inputs to [`project`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifecycleInput {
    pub initial_cost: f64,
    pub lifespan_years: u32,
    /// Annual maintenance amount per cost category.
    pub annual_maintenance_costs: BTreeMap<String, f64>,
    #[serde(default)]
    pub replacement_schedule: Vec<ReplacementEvent>,
    pub inflation_rate: f64,
}

/// Cost row for one year of the asset's lifespan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostYearEntry {
    /// Absolute calendar year.
    pub year: i32,
    pub maintenance_cost: f64,
    pub replacement_cost: f64,
    pub total_cost: f64,
}

/// Aggregate totals over all [`CostYearEntry`] rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifecycleSummary {
    pub initial_cost: f64,
    pub total_maintenance_cost: f64,
    pub total_replacement_cost: f64,
    pub total_lifecycle_cost: f64,
    pub annual_average_cost: f64,
}

/// Output of [`project`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifecycleProjection {
    pub yearly_costs: Vec<CostYearEntry>,
    pub summary: LifecycleSummary,
    /// Replacement entries whose `year_offset` falls outside `[0, lifespan_years)`.
    /// They are not costed.
    #[serde(default)]
    pub skipped_replacements: Vec<ReplacementEvent>,
}

impl LifecycleInput {
    pub fn validate(&self, limits: &PlanningLimits) -> DomainResult<()> {
        if self.lifespan_years == 0 {
            return Err(DomainError::invalid_parameter(
                "lifespan_years",
                "must be a positive number of years",
            ));
        }
        limits.check_lifespan_years(self.lifespan_years)?;
        ensure_non_negative("initial_cost", self.initial_cost)?;
        ensure_non_negative("inflation_rate", self.inflation_rate)?;
        for (category, amount) in &self.annual_maintenance_costs {
            ensure_non_negative(&format!("annual_maintenance_costs.{category}"), *amount)?;
        }
        for (i, replacement) in self.replacement_schedule.iter().enumerate() {
            ensure_non_negative(&format!("replacement_schedule[{i}].cost"), replacement.cost)?;
        }
        Ok(())
    }
}

/// Project lifecycle costs starting at calendar year `base_year`.
///
/// Maintenance for offset `k` is `base × (1 + inflation)^k`; replacement costs
/// scheduled at offset `k` are inflated by the same factor. Nothing is rounded
/// here; see [`Rounded`] for presentation.
pub fn project(
    input: &LifecycleInput,
    base_year: i32,
    limits: &PlanningLimits,
) -> DomainResult<LifecycleProjection> {
    input.validate(limits)?;
    check_calendar_years(base_year, input.lifespan_years)?;

    let lifespan = i64::from(input.lifespan_years);
    let base_maintenance: f64 = input.annual_maintenance_costs.values().sum();

    let (in_range, skipped): (Vec<&ReplacementEvent>, Vec<&ReplacementEvent>) = input
        .replacement_schedule
        .iter()
        .partition(|r| (0..lifespan).contains(&r.year_offset));

    let mut yearly_costs = Vec::with_capacity(input.lifespan_years as usize);
    let mut total_maintenance = 0.0;
    let mut total_replacement = 0.0;

    for k in 0..input.lifespan_years {
        let factor = (1.0 + input.inflation_rate).powi(k as i32);
        let maintenance_cost = base_maintenance * factor;
        let replacement_cost: f64 = in_range
            .iter()
            .filter(|r| r.year_offset == i64::from(k))
            .map(|r| r.cost * factor)
            .sum();

        total_maintenance += maintenance_cost;
        total_replacement += replacement_cost;

        yearly_costs.push(CostYearEntry {
            year: base_year + k as i32,
            maintenance_cost,
            replacement_cost,
            total_cost: maintenance_cost + replacement_cost,
        });
    }

    let total_lifecycle_cost = input.initial_cost + total_maintenance + total_replacement;
    if !total_lifecycle_cost.is_finite() {
        return Err(DomainError::degenerate(format!(
            "lifecycle cost overflowed over {} years at inflation rate {}",
            input.lifespan_years, input.inflation_rate
        )));
    }

    Ok(LifecycleProjection {
        yearly_costs,
        summary: LifecycleSummary {
            initial_cost: input.initial_cost,
            total_maintenance_cost: total_maintenance,
            total_replacement_cost: total_replacement,
            total_lifecycle_cost,
            annual_average_cost: total_lifecycle_cost / f64::from(input.lifespan_years),
        },
        skipped_replacements: skipped.into_iter().cloned().collect(),
    })
}

/// Every projected year must be a calendar year `NaiveDate` can represent.
fn check_calendar_years(base_year: i32, lifespan_years: u32) -> DomainResult<()> {
    let (min, max) = (NaiveDate::MIN.year(), NaiveDate::MAX.year());
    let last_year = i32::try_from(lifespan_years.saturating_sub(1))
        .ok()
        .and_then(|k| base_year.checked_add(k));
    match last_year {
        Some(last_year) if base_year >= min && last_year <= max => Ok(()),
        _ => Err(DomainError::invalid_parameter(
            "base_year",
            format!("projected years must stay within {min}..={max} (got base year {base_year})"),
        )),
    }
}

impl Rounded for CostYearEntry {
    fn rounded(self) -> Self {
        Self {
            year: self.year,
            maintenance_cost: round2(self.maintenance_cost),
            replacement_cost: round2(self.replacement_cost),
            total_cost: round2(self.total_cost),
        }
    }
}

impl Rounded for LifecycleSummary {
    fn rounded(self) -> Self {
        Self {
            initial_cost: round2(self.initial_cost),
            total_maintenance_cost: round2(self.total_maintenance_cost),
            total_replacement_cost: round2(self.total_replacement_cost),
            total_lifecycle_cost: round2(self.total_lifecycle_cost),
            annual_average_cost: round2(self.annual_average_cost),
        }
    }
}

impl Rounded for LifecycleProjection {
    fn rounded(self) -> Self {
        Self {
            yearly_costs: self.yearly_costs.rounded(),
            summary: self.summary.rounded(),
            skipped_replacements: self.skipped_replacements,
        }
    }
}
