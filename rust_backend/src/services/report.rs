//! Weekly report assembled for the presentation layer.
//!
//! Bundles the tracking table, the scalar indicators and the two percentage
//! gauges for one week into a single serializable value.

use serde::{Deserialize, Serialize};

use crate::config::KpiConfig;
use crate::core::domain::{ComparisonRow, KpiDataset, WeeklyIndicators};
use crate::error::{KpiError, KpiResult};
use crate::services::indicators::indicators_from_table;
use crate::services::reconcile::build_comparison;

/// Lowest valid ISO week number.
pub const MIN_WEEK: u32 = 1;
/// Highest valid ISO week number.
pub const MAX_WEEK: u32 = 53;

/// Lower and upper bounds of every gauge.
pub const GAUGE_RANGE: (f64, f64) = (0.0, 100.0);

/// Which band of a gauge a value falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GaugeBand {
    Low,
    Good,
}

/// A percentage indicator drawn on a fixed 0-100 gauge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gauge {
    pub title: String,
    pub value: f64,
    pub min: f64,
    pub max: f64,
    /// Values at or above this are highlighted
    pub good_from: f64,
    pub band: GaugeBand,
}

impl Gauge {
    pub fn new(title: impl Into<String>, value: f64, good_from: f64) -> Self {
        let band = if value >= good_from {
            GaugeBand::Good
        } else {
            GaugeBand::Low
        };

        Self {
            title: title.into(),
            value,
            min: GAUGE_RANGE.0,
            max: GAUGE_RANGE.1,
            good_from,
            band,
        }
    }

    /// Value clamped to the gauge range, for drawing the needle.
    pub fn needle(&self) -> f64 {
        self.value.clamp(self.min, self.max)
    }
}

/// Everything the dashboard shows for one week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyReport {
    pub week: u32,
    pub indicators: WeeklyIndicators,
    pub comparison: Vec<ComparisonRow>,
    pub adherence_gauge: Gauge,
    pub completion_gauge: Gauge,
}

/// Reject week numbers outside the ISO range.
pub fn validate_week(week: u32) -> KpiResult<u32> {
    if (MIN_WEEK..=MAX_WEEK).contains(&week) {
        Ok(week)
    } else {
        Err(KpiError::InvalidWeek(week))
    }
}

/// Build the report for `week` from the loaded snapshots.
///
/// # Errors
///
/// [`KpiError::InvalidWeek`] if `week` is not in 1-53. Missing or sparse data
/// never fails: indicators fall back to 0 and the table may be empty.
pub fn build_weekly_report(
    week: u32,
    dataset: &KpiDataset,
    config: &KpiConfig,
) -> KpiResult<WeeklyReport> {
    let week = validate_week(week)?;

    let comparison = build_comparison(week, &dataset.planned, &dataset.executions);
    let indicators = indicators_from_table(week, &comparison, &dataset.executions, config);
    let good_from = config.gauge.good_threshold_pct;

    log::info!(
        "Week {}: adherence {:.1}%, completion {:.1}%, {:.2} h over {} tracked routes",
        week,
        indicators.adherence_rate_pct,
        indicators.completion_rate_pct,
        indicators.cumulative_hours,
        comparison.len()
    );

    Ok(WeeklyReport {
        week,
        adherence_gauge: Gauge::new("Taux de Suivi", indicators.adherence_rate_pct, good_from),
        completion_gauge: Gauge::new(
            "Taux de Complétion Hebdomadaire",
            indicators.completion_rate_pct,
            good_from,
        ),
        indicators,
        comparison,
    })
}
