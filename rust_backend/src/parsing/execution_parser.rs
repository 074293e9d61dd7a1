//! Cleaning-run log parser.
//!
//! Maps the log's headers to execution fields through the configured aliases
//! and converts each row into an [`ExecutionRecord`]. Unparsable cells become
//! `None` and are counted; missing required columns are structural errors.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::config::KpiConfig;
use crate::core::domain::ExecutionRecord;
use crate::error::{KpiError, KpiResult, ParseError};
use crate::parsing::fields::{parse_decimal, parse_timestamp};
use crate::parsing::table::RawTable;

/// Result of parsing the run log
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExecutionLoad {
    pub records: Vec<ExecutionRecord>,
    /// Cells that were present but could not be parsed and were set to `None`
    pub coerced_cells: usize,
    /// Source rows dropped before parsing because they were malformed
    pub skipped_rows: usize,
}

/// Column positions of the execution fields in a log table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnMap {
    start_time: usize,
    route: usize,
    end_time: Option<usize>,
    duration: Option<usize>,
    area: Option<usize>,
    speed: Option<usize>,
    productivity: Option<usize>,
    completion: Option<usize>,
}

impl ColumnMap {
    fn resolve(table: &RawTable, config: &KpiConfig) -> KpiResult<Self> {
        let aliases = &config.columns;
        Ok(Self {
            start_time: required_column(table, &aliases.start_time, "start_time")?,
            route: required_column(table, &aliases.route, "route")?,
            end_time: optional_column(table, &aliases.end_time, "end_time"),
            duration: optional_column(table, &aliases.duration, "duration"),
            area: optional_column(table, &aliases.area, "area"),
            speed: optional_column(table, &aliases.speed, "speed"),
            productivity: optional_column(table, &aliases.productivity, "productivity"),
            completion: optional_column(table, &aliases.completion, "completion"),
        })
    }
}

fn required_column(table: &RawTable, aliases: &[String], field: &str) -> KpiResult<usize> {
    table
        .find_column(aliases)
        .ok_or_else(|| KpiError::MissingColumn(field.to_string()))
}

fn optional_column(table: &RawTable, aliases: &[String], field: &str) -> Option<usize> {
    let found = table.find_column(aliases);
    if found.is_none() {
        log::warn!("Run log has no {} column; values will be empty", field);
    }
    found
}

/// Convert a run-log table into execution records, one per row.
///
/// # Errors
///
/// [`KpiError::MissingColumn`] if no header matches the start time or route aliases.
pub fn parse_executions(table: &RawTable, config: &KpiConfig) -> KpiResult<ExecutionLoad> {
    let columns = ColumnMap::resolve(table, config)?;
    let formats = &config.ingest.timestamp_formats;
    let mut coerced_cells = 0;
    let mut records = Vec::with_capacity(table.height());

    for row in 0..table.height() {
        let mut cells = RowReader {
            table,
            row,
            coerced: &mut coerced_cells,
        };

        let start_time = cells.timestamp(Some(columns.start_time), formats);
        let route = table.cell(row, columns.route).unwrap_or_default();

        let mut record = ExecutionRecord::new(route, start_time);
        record.end_time = cells.timestamp(columns.end_time, formats);
        record.duration_minutes = cells.number(columns.duration);
        record.area_cleaned_sqm = cells.number(columns.area);
        record.avg_speed_kmh = cells.number(columns.speed);
        record.productivity_sqm_per_h = cells.number(columns.productivity);
        record.completion_pct = cells.number(columns.completion);

        records.push(record);
    }

    if coerced_cells > 0 {
        log::warn!(
            "Coerced {} unparsable cells to empty values in {} runs",
            coerced_cells,
            records.len()
        );
    }

    Ok(ExecutionLoad {
        records,
        coerced_cells,
        skipped_rows: 0,
    })
}

struct RowReader<'a> {
    table: &'a RawTable,
    row: usize,
    coerced: &'a mut usize,
}

impl RowReader<'_> {
    fn number(&mut self, column: Option<usize>) -> Option<f64> {
        let text = self.table.cell(self.row, column?)?;
        match parse_decimal(text) {
            Ok(value) => Some(value),
            Err(e) => self.coerce(e),
        }
    }

    fn timestamp(
        &mut self,
        column: Option<usize>,
        formats: &[String],
    ) -> Option<NaiveDateTime> {
        let text = self.table.cell(self.row, column?)?;
        match parse_timestamp(text, formats) {
            Ok(value) => Some(value),
            Err(e) => self.coerce(e),
        }
    }

    fn coerce<T>(&mut self, error: ParseError) -> Option<T> {
        log::debug!("Row {}: {}", self.row, error);
        *self.coerced += 1;
        None
    }
}
