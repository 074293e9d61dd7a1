use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

use crate::config::{KpiConfig, TextEncoding};
use crate::core::domain::{KpiDataset, PlannedAssignment};
use crate::parsing::{parse_executions, parse_plan, ExecutionLoad, RawTable};

/// What to do with a row that has more fields than the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadRowPolicy {
    /// Drop the row and keep reading
    Skip,
    /// Fail the whole load
    Reject,
}

/// Result of reading one CSV table
#[derive(Debug)]
pub struct TableLoadResult {
    pub table: RawTable,
    pub skipped_rows: usize,
}

/// Reads delimited text into a [`RawTable`].
///
/// Rows shorter than the header are padded with empty cells; longer rows are
/// handled according to the [`BadRowPolicy`].
pub struct TableLoader;

impl TableLoader {
    /// Read and decode a CSV file
    pub fn load_from_file(
        path: &Path,
        delimiter: char,
        encoding: TextEncoding,
        policy: BadRowPolicy,
    ) -> Result<TableLoadResult> {
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        let text = decode(&bytes, encoding)
            .with_context(|| format!("Failed to decode {}", path.display()))?;
        Self::load_from_str(&text, delimiter, policy)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Read CSV text that is already decoded
    pub fn load_from_str(
        text: &str,
        delimiter: char,
        policy: BadRowPolicy,
    ) -> Result<TableLoadResult> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter_byte(delimiter)?)
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader
            .headers()
            .context("Failed to read CSV header row")?
            .iter()
            .map(|h| h.to_string())
            .collect();
        let width = headers.len();

        let mut rows = Vec::new();
        let mut skipped_rows = 0;

        for (idx, result) in reader.records().enumerate() {
            // Header is line 1
            let line = idx + 2;
            let problem = match result {
                Ok(record) if record.len() <= width => {
                    let mut row: Vec<Option<String>> =
                        record.iter().map(|c| Some(c.to_string())).collect();
                    row.resize(width, None);
                    rows.push(row);
                    continue;
                }
                Ok(record) => format!(
                    "line {} has {} fields, expected {}",
                    line,
                    record.len(),
                    width
                ),
                Err(e) => format!("line {}: {}", line, e),
            };

            match policy {
                BadRowPolicy::Skip => {
                    log::warn!("Skipping malformed CSV row: {}", problem);
                    skipped_rows += 1;
                }
                BadRowPolicy::Reject => bail!("Malformed CSV row: {}", problem),
            }
        }

        let table = RawTable::new(headers, rows)?;
        Ok(TableLoadResult {
            table,
            skipped_rows,
        })
    }
}

/// Decode file contents in the configured encoding
pub fn decode(bytes: &[u8], encoding: TextEncoding) -> Result<String> {
    let text: String = match encoding {
        // Every ISO-8859-1 byte maps to the code point of the same value
        TextEncoding::Latin1 => bytes.iter().map(|&b| char::from(b)).collect(),
        TextEncoding::Utf8 => {
            String::from_utf8(bytes.to_vec()).context("File is not valid UTF-8")?
        }
    };

    if let Some(stripped) = text.strip_prefix('\u{feff}') {
        return Ok(stripped.to_string());
    }
    Ok(text)
}

fn delimiter_byte(delimiter: char) -> Result<u8> {
    if !delimiter.is_ascii() {
        bail!("Delimiter {:?} is not a single ASCII character", delimiter);
    }
    Ok(delimiter as u8)
}

/// Result of loading both source tables
#[derive(Debug)]
pub struct DatasetLoadResult {
    pub dataset: KpiDataset,
    pub coerced_cells: usize,
    pub skipped_rows: usize,
}

/// Loads the plan and the run log into a [`KpiDataset`].
pub struct DatasetLoader;

impl DatasetLoader {
    /// Load the plan table.
    ///
    /// Malformed rows are rejected: dropping one would shift the date of every
    /// following cell.
    pub fn load_plan(path: &Path, config: &KpiConfig) -> Result<Vec<PlannedAssignment>> {
        let loaded = TableLoader::load_from_file(
            path,
            config.ingest.plan_delimiter,
            config.ingest.encoding,
            BadRowPolicy::Reject,
        )?;

        parse_plan(&loaded.table, config.plan.epoch)
            .with_context(|| format!("Invalid plan table {}", path.display()))
    }

    /// Load the run log, skipping malformed rows.
    pub fn load_executions(path: &Path, config: &KpiConfig) -> Result<ExecutionLoad> {
        let loaded = TableLoader::load_from_file(
            path,
            config.ingest.execution_delimiter,
            config.ingest.encoding,
            BadRowPolicy::Skip,
        )?;

        let mut executions = parse_executions(&loaded.table, config)
            .with_context(|| format!("Invalid run log {}", path.display()))?;
        executions.skipped_rows = loaded.skipped_rows;
        Ok(executions)
    }

    /// Load both tables
    pub fn load(
        plan_path: &Path,
        executions_path: &Path,
        config: &KpiConfig,
    ) -> Result<DatasetLoadResult> {
        let planned = Self::load_plan(plan_path, config)?;
        let executions = Self::load_executions(executions_path, config)?;

        log::info!(
            "Loaded {} planned assignments and {} runs ({} rows skipped, {} cells coerced)",
            planned.len(),
            executions.records.len(),
            executions.skipped_rows,
            executions.coerced_cells
        );

        Ok(DatasetLoadResult {
            dataset: KpiDataset::new(planned, executions.records),
            coerced_cells: executions.coerced_cells,
            skipped_rows: executions.skipped_rows,
        })
    }
}
