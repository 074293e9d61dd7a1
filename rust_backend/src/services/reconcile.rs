//! Planned-vs-actual reconciliation for one calendar week.

use std::collections::{HashMap, HashSet};

use crate::core::domain::{ComparisonRow, DayStatus, ExecutionRecord, PlannedAssignment, Weekday};
use crate::transformations::normalize_route;

/// Distinct planned routes over the whole planning horizon, in first-seen order.
///
/// Returns `(canonical key, trimmed label)` pairs. Blank route names are excluded.
pub fn route_universe(planned: &[PlannedAssignment]) -> Vec<(String, String)> {
    let mut seen = HashSet::new();
    planned
        .iter()
        .filter_map(|p| {
            let key = normalize_route(&p.route_name);
            if key.is_empty() || !seen.insert(key.clone()) {
                return None;
            }
            Some((key, p.route_name.trim().to_string()))
        })
        .collect()
}

/// Canonical route keys planned for `(week, day)`.
pub fn planned_routes(planned: &[PlannedAssignment], week: u32, day: Weekday) -> HashSet<String> {
    planned
        .iter()
        .filter(|p| p.calendar_week == week && p.weekday == day)
        .map(|p| normalize_route(&p.route_name))
        .filter(|key| !key.is_empty())
        .collect()
}

/// Canonical route keys executed on each weekday of `week`.
///
/// Only runs whose ISO week equals `week` exactly are considered; runs without
/// a start time have no week and are ignored.
pub fn executed_routes(
    executions: &[ExecutionRecord],
    week: u32,
) -> HashMap<Weekday, HashSet<String>> {
    let mut by_day: HashMap<Weekday, HashSet<String>> = HashMap::new();

    for record in executions.iter().filter(|r| r.in_week(week)) {
        let Some(day) = record.weekday else {
            continue;
        };
        let key = normalize_route(&record.route_name);
        if !key.is_empty() {
            by_day.entry(day).or_default().insert(key);
        }
    }

    by_day
}

/// Build the weekly tracking table.
///
/// One row per distinct planned route across the whole plan, in first-seen
/// order. A route is [`DayStatus::Done`] on a day iff at least one run of that
/// route started on that day of `week`. If nothing is planned in `week` the
/// table is empty.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use route_kpi::core::domain::{DayStatus, ExecutionRecord, PlannedAssignment, Weekday};
/// use route_kpi::services::reconcile::build_comparison;
///
/// let monday = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
/// let planned = vec![PlannedAssignment::new(Weekday::Monday, "A", monday)];
/// let runs = vec![ExecutionRecord::new(" a ", monday.and_hms_opt(7, 0, 0))];
///
/// let rows = build_comparison(3, &planned, &runs);
/// assert_eq!(rows.len(), 1);
/// assert_eq!(rows[0].route_name, "a");
/// assert_eq!(rows[0].status(Weekday::Monday), DayStatus::Done);
/// assert_eq!(rows[0].done_count(), 1);
/// ```
pub fn build_comparison(
    week: u32,
    planned: &[PlannedAssignment],
    executions: &[ExecutionRecord],
) -> Vec<ComparisonRow> {
    if !planned.iter().any(|p| p.calendar_week == week) {
        log::debug!("No planned assignments in week {}; tracking table is empty", week);
        return Vec::new();
    }

    let executed = executed_routes(executions, week);

    let mut unplanned_runs = 0;
    for day in Weekday::ALL {
        let planned_today = planned_routes(planned, week, day);
        if let Some(done_today) = executed.get(&day) {
            unplanned_runs += done_today.difference(&planned_today).count();
        }
    }

    let rows: Vec<ComparisonRow> = route_universe(planned)
        .into_iter()
        .map(|(key, label)| {
            let mut row = ComparisonRow::new(key, label);
            for day in Weekday::ALL {
                if executed
                    .get(&day)
                    .is_some_and(|routes| routes.contains(&row.route_name))
                {
                    row.set_status(day, DayStatus::Done);
                }
            }
            row
        })
        .collect();

    log::debug!(
        "Week {}: {} routes tracked, {} done cells, {} route-days executed outside the plan",
        week,
        rows.len(),
        rows.iter().map(ComparisonRow::done_count).sum::<usize>(),
        unplanned_runs
    );

    rows
}
