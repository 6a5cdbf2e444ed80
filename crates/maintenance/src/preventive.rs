//! Preventive maintenance optimization.
//!
//! Model:
//! - Fit a linear deterioration rate from the first and last condition assessments.
//! - Project condition year by year from the last assessment.
//! - Whenever the projection falls below the threshold, apply the intervention
//!   with the best `condition_improvement / cost` ratio and rebase the projection
//!   on the improved condition.
//!
//! Interventions are applied greedily in chronological order; each one resets
//! the baseline that later years deteriorate from.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use transitplan_core::{
    DomainError, DomainResult,
    error::{ensure_in_range, ensure_non_negative, ensure_not_blank},
};

use crate::asset::Asset;
use crate::limits::PlanningLimits;
use crate::rounding::{Rounded, round2};
use crate::schedule::shift_days;

/// Days per projected year (condition dates step in 365-day years).
pub const DAYS_PER_YEAR: i64 = 365;

/// Rate used when the history cannot support a fitted trend.
pub const DEFAULT_FALLBACK_DETERIORATION_RATE: f64 = 0.1;

/// One historical condition assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionObservation {
    pub assessment_date: NaiveDate,
    /// 1.0 = new, 0.0 = failed.
    pub condition_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessor: Option<String>,
}

/// A catalog entry describing one kind of intervention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterventionOption {
    pub name: String,
    pub condition_improvement: f64,
    pub cost: f64,
}

impl InterventionOption {
    /// Condition points gained per unit of cost.
    pub fn cost_benefit_ratio(&self) -> f64 {
        ratio_or_zero(self.condition_improvement, self.cost)
    }
}

/// Tunables for [`optimize`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimizerSettings {
    /// Annual deterioration assumed when fewer than two assessments exist or
    /// they share a date.
    pub fallback_deterioration_rate: f64,
}

impl Default for OptimizerSettings {
    fn default() -> Self {
        Self {
            fallback_deterioration_rate: DEFAULT_FALLBACK_DETERIORATION_RATE,
        }
    }
}

/// Inputs to [`optimize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationRequest {
    pub asset: Asset,
    pub history: Vec<ConditionObservation>,
    #[serde(default)]
    pub options: Vec<InterventionOption>,
    pub threshold: f64,
    pub projection_years: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeteriorationEstimate {
    /// Condition points lost per year (negative if the asset improved).
    pub rate_per_year: f64,
    pub fallback_used: bool,
}

/// Where the fitted trend crosses the maintenance threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdCrossing {
    pub date: NaiveDate,
    /// Negative when the crossing already happened before the last assessment.
    pub years_from_last_assessment: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictedCondition {
    pub year_offset: u32,
    pub prediction_date: NaiveDate,
    /// Projected condition before any intervention in this year.
    pub predicted_condition: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition_after_intervention: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intervention {
    pub intervention_id: String,
    /// Years after the last assessment (0 = immediately).
    pub year_offset: u32,
    pub recommended_date: NaiveDate,
    pub condition_before: f64,
    pub condition_after: f64,
    pub action: String,
    pub cost: f64,
    pub cost_benefit_ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimizationMetrics {
    pub total_maintenance_cost: f64,
    pub total_condition_improvement: f64,
    /// Cost per condition point gained; 0 when nothing was gained.
    pub cost_per_condition_point: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationOutcome {
    pub deterioration: DeteriorationEstimate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold_crossing: Option<ThresholdCrossing>,
    pub predicted_conditions: Vec<PredictedCondition>,
    pub interventions: Vec<Intervention>,
    pub metrics: OptimizationMetrics,
}

impl OptimizerSettings {
    pub fn validate(&self) -> DomainResult<()> {
        ensure_non_negative(
            "settings.fallback_deterioration_rate",
            self.fallback_deterioration_rate,
        )
    }
}

impl OptimizationRequest {
    pub fn validate(&self, limits: &PlanningLimits) -> DomainResult<()> {
        self.asset.validate()?;
        if self.history.is_empty() {
            return Err(DomainError::invalid_parameter(
                "history",
                "at least one condition observation is required",
            ));
        }
        for (i, obs) in self.history.iter().enumerate() {
            ensure_in_range(
                &format!("history[{i}].condition_score"),
                obs.condition_score,
                0.0,
                1.0,
            )?;
        }
        if !(self.threshold.is_finite() && self.threshold > 0.0 && self.threshold < 1.0) {
            return Err(DomainError::invalid_parameter(
                "threshold",
                format!("must be within (0, 1) (got {})", self.threshold),
            ));
        }
        if self.projection_years == 0 {
            return Err(DomainError::invalid_parameter(
                "projection_years",
                "must be a positive number of years",
            ));
        }
        limits.check_projection_years(self.projection_years)?;
        for (i, option) in self.options.iter().enumerate() {
            ensure_not_blank(&format!("options[{i}].name"), &option.name)?;
            let improvement = option.condition_improvement;
            if !(improvement.is_finite() && improvement > 0.0 && improvement <= 1.0) {
                return Err(DomainError::invalid_parameter(
                    format!("options[{i}].condition_improvement"),
                    format!("must be within (0, 1] (got {improvement})"),
                ));
            }
            if !(option.cost.is_finite() && option.cost > 0.0) {
                return Err(DomainError::invalid_parameter(
                    format!("options[{i}].cost"),
                    format!("must be > 0 (got {})", option.cost),
                ));
            }
        }
        Ok(())
    }
}

/// Estimate the linear deterioration rate from date-ordered observations.
pub fn estimate_deterioration(
    history: &[ConditionObservation],
    settings: &OptimizerSettings,
) -> DeteriorationEstimate {
    let fallback = DeteriorationEstimate {
        rate_per_year: settings.fallback_deterioration_rate,
        fallback_used: true,
    };

    let (Some(first), Some(last)) = (history.first(), history.last()) else {
        return fallback;
    };
    if history.len() < 2 {
        return fallback;
    }

    let days = (last.assessment_date - first.assessment_date).num_days();
    if days <= 0 {
        return fallback;
    }

    let years = days as f64 / DAYS_PER_YEAR as f64;
    DeteriorationEstimate {
        rate_per_year: (first.condition_score - last.condition_score) / years,
        fallback_used: false,
    }
}

/// Pick the option with the highest cost-benefit ratio.
///
/// Ties go to the option listed first in the catalog.
pub fn best_option(options: &[InterventionOption]) -> Option<&InterventionOption> {
    let mut best: Option<(&InterventionOption, f64)> = None;
    for option in options {
        let ratio = option.cost_benefit_ratio();
        match best {
            Some((_, best_ratio)) if ratio <= best_ratio => {}
            _ => best = Some((option, ratio)),
        }
    }
    best.map(|(option, _)| option)
}

/// Project condition and recommend cost-effective interventions.
pub fn optimize(
    request: &OptimizationRequest,
    settings: &OptimizerSettings,
    limits: &PlanningLimits,
) -> DomainResult<OptimizationOutcome> {
    request.validate(limits)?;
    settings.validate()?;

    let mut history = request.history.clone();
    history.sort_by_key(|o| o.assessment_date);

    let deterioration = estimate_deterioration(&history, settings);
    let rate = deterioration.rate_per_year;

    let last = history
        .last()
        .ok_or_else(|| DomainError::invalid_parameter("history", "must not be empty"))?;
    let last_date = last.assessment_date;
    let last_condition = clamp_condition(last.condition_score);

    let threshold_crossing = crossing(last_date, last_condition, rate, request.threshold);
    let chosen = best_option(&request.options);

    let mut interventions: Vec<Intervention> = Vec::new();
    let mut base_condition = last_condition;
    let mut base_year: u32 = 0;

    // Already below threshold at the last assessment: act now.
    if last_condition < request.threshold {
        if let Some(option) = chosen {
            let intervention =
                recommend(request, option, 0, last_date, last_condition, interventions.len());
            base_condition = intervention.condition_after;
            interventions.push(intervention);
        }
    }

    let mut predicted_conditions = Vec::with_capacity(request.projection_years as usize);
    for year in 1..=request.projection_years {
        let prediction_date = shift_days(last_date, i64::from(year) * DAYS_PER_YEAR)
            .ok_or_else(|| {
                DomainError::invalid_parameter("projection_years", "exceeds the calendar range")
            })?;
        let predicted = clamp_condition(base_condition - rate * f64::from(year - base_year));

        let mut after_intervention = None;
        if predicted < request.threshold {
            if let Some(option) = chosen {
                let intervention =
                    recommend(request, option, year, prediction_date, predicted, interventions.len());
                base_condition = intervention.condition_after;
                base_year = year;
                after_intervention = Some(intervention.condition_after);
                interventions.push(intervention);
            }
        }

        predicted_conditions.push(PredictedCondition {
            year_offset: year,
            prediction_date,
            predicted_condition: predicted,
            condition_after_intervention: after_intervention,
        });
    }

    let total_maintenance_cost: f64 = interventions.iter().map(|i| i.cost).sum();
    let total_condition_improvement: f64 = interventions
        .iter()
        .map(|i| i.condition_after - i.condition_before)
        .sum();

    Ok(OptimizationOutcome {
        deterioration,
        threshold_crossing,
        predicted_conditions,
        interventions,
        metrics: OptimizationMetrics {
            total_maintenance_cost,
            total_condition_improvement,
            cost_per_condition_point: ratio_or_zero(
                total_maintenance_cost,
                total_condition_improvement,
            ),
        },
    })
}

fn recommend(
    request: &OptimizationRequest,
    option: &InterventionOption,
    year_offset: u32,
    date: NaiveDate,
    before: f64,
    already_recommended: usize,
) -> Intervention {
    Intervention {
        intervention_id: format!(
            "{}-INT-{:02}",
            request.asset.asset_id,
            already_recommended + 1
        ),
        year_offset,
        recommended_date: date,
        condition_before: before,
        condition_after: clamp_condition(before + option.condition_improvement),
        action: option.name.clone(),
        cost: option.cost,
        cost_benefit_ratio: option.cost_benefit_ratio(),
    }
}

/// Date at which the trend through the last assessment meets `threshold`.
///
/// `None` when the asset is not deteriorating or the crossing lies outside the
/// representable calendar.
fn crossing(
    last_date: NaiveDate,
    last_condition: f64,
    rate: f64,
    threshold: f64,
) -> Option<ThresholdCrossing> {
    if rate <= 0.0 {
        return None;
    }
    let years = (last_condition - threshold) / rate;
    let days = (years * DAYS_PER_YEAR as f64).round();
    if !days.is_finite() || days.abs() > 3_650_000.0 {
        return None;
    }
    let date = shift_days(last_date, days as i64)?;
    Some(ThresholdCrossing {
        date,
        years_from_last_assessment: years,
    })
}

impl Rounded for PredictedCondition {
    fn rounded(self) -> Self {
        Self {
            predicted_condition: round2(self.predicted_condition),
            condition_after_intervention: self.condition_after_intervention.map(round2),
            ..self
        }
    }
}

impl Rounded for Intervention {
    fn rounded(self) -> Self {
        Self {
            condition_before: round2(self.condition_before),
            condition_after: round2(self.condition_after),
            ..self
        }
    }
}

impl Rounded for OptimizationMetrics {
    fn rounded(self) -> Self {
        Self {
            total_maintenance_cost: round2(self.total_maintenance_cost),
            total_condition_improvement: round2(self.total_condition_improvement),
            cost_per_condition_point: round2(self.cost_per_condition_point),
        }
    }
}

impl Rounded for OptimizationOutcome {
    fn rounded(self) -> Self {
        Self {
            predicted_conditions: self.predicted_conditions.rounded(),
            interventions: self.interventions.rounded(),
            metrics: self.metrics.rounded(),
            ..self
        }
    }
}

fn clamp_condition(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// `numerator / denominator`, or 0 when the denominator is not positive.
pub fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}
