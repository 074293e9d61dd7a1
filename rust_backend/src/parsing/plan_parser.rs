//! Plan table parser.
//!
//! The plan has one column per weekday and one route name per cell. Cells are
//! dated by their position in column-major order: the first cell of the first
//! column is the epoch, and each following cell (blank ones included) is one
//! day later. The ISO week of that date is the assignment's calendar week.

use chrono::{Days, NaiveDate};

use crate::core::domain::PlannedAssignment;
use crate::error::{KpiError, KpiResult};
use crate::parsing::table::RawTable;
use crate::transformations::parse_weekday;

/// Convert a plan table into planned assignments.
///
/// Every non-blank cell yields exactly one assignment; blank cells are dropped.
///
/// # Errors
///
/// * [`KpiError::UnknownWeekday`] if a header is not a weekday in either locale
/// * [`KpiError::MalformedTable`] if a cell date overflows the calendar
pub fn parse_plan(table: &RawTable, epoch: NaiveDate) -> KpiResult<Vec<PlannedAssignment>> {
    let weekdays = table
        .headers()
        .iter()
        .map(|h| parse_weekday(h))
        .collect::<KpiResult<Vec<_>>>()?;

    let height = table.height();
    let mut assignments = Vec::new();

    for (col, weekday) in weekdays.iter().enumerate() {
        for row in 0..height {
            let Some(route) = table.cell(row, col) else {
                continue;
            };

            let offset = (col * height + row) as u64;
            let date = epoch.checked_add_days(Days::new(offset)).ok_or_else(|| {
                KpiError::MalformedTable(format!(
                    "plan cell ({}, {}) is out of the calendar range",
                    row, col
                ))
            })?;

            assignments.push(PlannedAssignment::new(*weekday, route, date));
        }
    }

    log::debug!(
        "Parsed {} planned assignments from a {}x{} plan table",
        assignments.len(),
        height,
        table.width()
    );

    Ok(assignments)
}
