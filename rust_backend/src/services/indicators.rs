//! Weekly indicators computed from the run log and the tracking table.
//!
//! Every computation skips missing values instead of propagating them and
//! returns 0 instead of dividing by zero, so a week with sparse data still
//! renders.

use std::collections::HashMap;

use crate::config::KpiConfig;
use crate::core::domain::{ComparisonRow, ExecutionRecord, PlannedAssignment, WeeklyIndicators};
use crate::services::reconcile::build_comparison;
use crate::transformations::normalize_route;

/// Default minimum average completion for a route to count as completed.
pub const DEFAULT_COMPLETION_THRESHOLD_PCT: f64 = 90.0;

/// Share of nominal plan slots marked done, in percent.
///
/// `expected_slots` is the nominal plan size (days × routes per day), not the
/// number of rows in the table. Returns 0 when `expected_slots` is 0.
///
/// # Examples
///
/// ```
/// use route_kpi::core::domain::{ComparisonRow, DayStatus, Weekday};
/// use route_kpi::services::indicators::adherence_rate;
///
/// let mut row = ComparisonRow::new("a", "A");
/// row.set_status(Weekday::Monday, DayStatus::Done);
/// assert_eq!(adherence_rate(&[row], 4), 25.0);
/// assert_eq!(adherence_rate(&[], 0), 0.0);
/// ```
pub fn adherence_rate(rows: &[ComparisonRow], expected_slots: u32) -> f64 {
    if expected_slots == 0 {
        return 0.0;
    }
    let done: usize = rows.iter().map(ComparisonRow::done_count).sum();
    done as f64 / expected_slots as f64 * 100.0
}

/// Share of routes whose average completion in `week` reaches `threshold_pct`.
///
/// Completion is averaged per canonical route first, then each average is
/// compared with the threshold. Routes with no completion value that week are
/// left out of both counts. Returns 0 when no route has a value.
pub fn completion_rate(records: &[ExecutionRecord], week: u32, threshold_pct: f64) -> f64 {
    let mut per_route: HashMap<String, (f64, usize)> = HashMap::new();

    for record in records.iter().filter(|r| r.in_week(week)) {
        let Some(completion) = record.completion_pct else {
            continue;
        };
        let key = normalize_route(&record.route_name);
        if key.is_empty() {
            continue;
        }
        let entry = per_route.entry(key).or_insert((0.0, 0));
        entry.0 += completion;
        entry.1 += 1;
    }

    let total_routes = per_route.len();
    if total_routes == 0 {
        return 0.0;
    }

    let completed_routes = per_route
        .values()
        .filter(|(sum, count)| sum / *count as f64 >= threshold_pct)
        .count();

    completed_routes as f64 / total_routes as f64 * 100.0
}

/// Total run time in `week`, in hours.
pub fn cumulative_hours(records: &[ExecutionRecord], week: u32) -> f64 {
    sum_field(records, week, |r| r.duration_minutes) / 60.0
}

/// Total cleaned surface in `week`, in square metres.
pub fn cleaned_area(records: &[ExecutionRecord], week: u32) -> f64 {
    sum_field(records, week, |r| r.area_cleaned_sqm)
}

/// Mean of the per-run average speeds in `week`, in km/h.
pub fn avg_speed(records: &[ExecutionRecord], week: u32) -> f64 {
    mean_field(records, week, |r| r.avg_speed_kmh).unwrap_or(0.0)
}

/// Mean of the per-run hourly productivity in `week`, in m²/h.
pub fn avg_productivity(records: &[ExecutionRecord], week: u32) -> f64 {
    mean_field(records, week, |r| r.productivity_sqm_per_h).unwrap_or(0.0)
}

fn sum_field(
    records: &[ExecutionRecord],
    week: u32,
    field: impl Fn(&ExecutionRecord) -> Option<f64>,
) -> f64 {
    records
        .iter()
        .filter(|r| r.in_week(week))
        .filter_map(field)
        .sum()
}

fn mean_field(
    records: &[ExecutionRecord],
    week: u32,
    field: impl Fn(&ExecutionRecord) -> Option<f64>,
) -> Option<f64> {
    let values: Vec<f64> = records
        .iter()
        .filter(|r| r.in_week(week))
        .filter_map(field)
        .collect();

    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Compute all indicators for `week` from an already built tracking table.
pub fn indicators_from_table(
    week: u32,
    rows: &[ComparisonRow],
    records: &[ExecutionRecord],
    config: &KpiConfig,
) -> WeeklyIndicators {
    WeeklyIndicators {
        cumulative_hours: cumulative_hours(records, week),
        cleaned_area_sqm: cleaned_area(records, week),
        avg_speed_kmh: avg_speed(records, week),
        avg_productivity_sqm_per_h: avg_productivity(records, week),
        adherence_rate_pct: adherence_rate(rows, config.plan.expected_slots()),
        completion_rate_pct: completion_rate(records, week, config.completion.threshold_pct),
    }
}

/// Compute all indicators for `week` from the two source snapshots.
pub fn weekly_indicators(
    week: u32,
    planned: &[PlannedAssignment],
    records: &[ExecutionRecord],
    config: &KpiConfig,
) -> WeeklyIndicators {
    let rows = build_comparison(week, planned, records);
    indicators_from_table(week, &rows, records, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::{DayStatus, Weekday};
    use chrono::NaiveDate;

    /// A run on Monday 2024-01-15 (ISO week 3)
    fn run(route: &str) -> ExecutionRecord {
        let start = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(6, 0, 0);
        ExecutionRecord::new(route, start)
    }

    fn run_with_completion(route: &str, completion: Option<f64>) -> ExecutionRecord {
        ExecutionRecord {
            completion_pct: completion,
            ..run(route)
        }
    }

    fn rows_with_done_cells(routes: usize, done: usize) -> Vec<ComparisonRow> {
        let mut rows: Vec<ComparisonRow> = (0..routes)
            .map(|i| ComparisonRow::new(format!("r{}", i), format!("R{}", i)))
            .collect();
        for cell in 0..done {
            rows[cell / 7].set_status(Weekday::ALL[cell % 7], DayStatus::Done);
        }
        rows
    }

    #[test]
    fn test_adherence_half_of_nominal_week() {
        let rows = rows_with_done_cells(8, 28);
        assert_eq!(adherence_rate(&rows, 56), 50.0);
    }

    #[test]
    fn test_adherence_empty_table() {
        assert_eq!(adherence_rate(&[], 56), 0.0);
    }

    #[test]
    fn test_adherence_zero_denominator() {
        let rows = rows_with_done_cells(2, 5);
        assert_eq!(adherence_rate(&rows, 0), 0.0);
    }

    #[test]
    fn test_completion_uses_route_average() {
        let records = vec![
            run_with_completion("A", Some(95.0)),
            run_with_completion("A", Some(92.0)),
            run_with_completion("A", Some(88.0)),
        ];
        assert_eq!(completion_rate(&records, 3, 90.0), 100.0);
    }

    #[test]
    fn test_completion_average_differs_from_per_run_threshold() {
        // Route A averages 85 although two of three runs reach 90
        let records = vec![
            run_with_completion("A", Some(90.0)),
            run_with_completion("a ", Some(95.0)),
            run_with_completion("A", Some(70.0)),
            run_with_completion("B", Some(100.0)),
        ];
        assert_eq!(completion_rate(&records, 3, 90.0), 50.0);
    }

    #[test]
    fn test_completion_ignores_routes_without_values() {
        let records = vec![
            run_with_completion("A", Some(99.0)),
            run_with_completion("B", None),
            run_with_completion("B", None),
            run_with_completion("C", Some(50.0)),
            run_with_completion("C", None),
        ];
        assert_eq!(completion_rate(&records, 3, 90.0), 50.0);
    }

    #[test]
    fn test_completion_no_data() {
        let records = vec![run_with_completion("A", None)];
        assert_eq!(completion_rate(&records, 3, 90.0), 0.0);
        assert_eq!(completion_rate(&[], 3, 90.0), 0.0);
        assert_eq!(completion_rate(&records, 4, 90.0), 0.0);
    }

    #[test]
    fn test_completion_threshold_inclusive() {
        let records = vec![run_with_completion("A", Some(90.0))];
        assert_eq!(completion_rate(&records, 3, 90.0), 100.0);
    }

    #[test]
    fn test_cumulative_hours_skips_missing() {
        let records: Vec<ExecutionRecord> = [Some(60.0), None, Some(30.0)]
            .into_iter()
            .map(|d| ExecutionRecord {
                duration_minutes: d,
                ..run("A")
            })
            .collect();
        assert_eq!(cumulative_hours(&records, 3), 1.5);
    }

    #[test]
    fn test_week_filter_excludes_undated_runs() {
        let mut undated = ExecutionRecord::new("A", None);
        undated.area_cleaned_sqm = Some(500.0);
        undated.avg_speed_kmh = Some(10.0);

        let dated = ExecutionRecord {
            area_cleaned_sqm: Some(200.0),
            avg_speed_kmh: Some(4.0),
            ..run("A")
        };

        let records = vec![undated, dated];
        assert_eq!(cleaned_area(&records, 3), 200.0);
        assert_eq!(avg_speed(&records, 3), 4.0);
    }

    #[test]
    fn test_means_skip_missing_and_default_to_zero() {
        let records = vec![
            ExecutionRecord {
                productivity_sqm_per_h: Some(1000.0),
                ..run("A")
            },
            ExecutionRecord {
                productivity_sqm_per_h: None,
                ..run("B")
            },
            ExecutionRecord {
                productivity_sqm_per_h: Some(2000.0),
                ..run("C")
            },
        ];
        assert_eq!(avg_productivity(&records, 3), 1500.0);
        assert_eq!(avg_productivity(&records, 10), 0.0);
        assert_eq!(avg_speed(&records, 3), 0.0);
    }

    #[test]
    fn test_weekly_indicators_combines_everything() {
        let monday = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let planned = vec![
            PlannedAssignment::new(Weekday::Monday, "A", monday),
            PlannedAssignment::new(Weekday::Monday, "B", monday),
        ];
        let records = vec![ExecutionRecord {
            duration_minutes: Some(120.0),
            area_cleaned_sqm: Some(3000.0),
            avg_speed_kmh: Some(3.5),
            productivity_sqm_per_h: Some(1500.0),
            completion_pct: Some(96.0),
            ..run("a")
        }];

        let mut config = KpiConfig::default();
        config.plan.routes_per_day = 2;

        let indicators = weekly_indicators(3, &planned, &records, &config);
        assert_eq!(indicators.cumulative_hours, 2.0);
        assert_eq!(indicators.cleaned_area_sqm, 3000.0);
        assert_eq!(indicators.avg_speed_kmh, 3.5);
        assert_eq!(indicators.avg_productivity_sqm_per_h, 1500.0);
        assert_eq!(indicators.completion_rate_pct, 100.0);
        // 1 done cell out of 7 × 2 nominal slots
        assert!((indicators.adherence_rate_pct - 100.0 / 14.0).abs() < 1e-9);
    }
}
