//! Parsers turning raw tables into typed domain records.
//!
//! This module converts the two source tables into the records consumed by
//! the reconciler and the indicator computations. Per-field failures are
//! absorbed as empty values here, so the core never sees malformed cells.
//!
//! # Parsers
//!
//! - [`table`]: The [`RawTable`] in-memory representation
//! - [`fields`]: Decimal-comma numbers and timestamps
//! - [`plan_parser`]: Weekday-column plan tables
//! - [`execution_parser`]: Cleaning-run logs
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use route_kpi::parsing::{parse_plan, RawTable};
//!
//! let table = RawTable::from_strings(&["Lundi", "Mardi"], &[vec!["Hall A", "Quai 2"]]).unwrap();
//! let epoch = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let planned = parse_plan(&table, epoch).unwrap();
//! assert_eq!(planned.len(), 2);
//! ```

pub mod execution_parser;
pub mod fields;
pub mod plan_parser;
pub mod table;

#[cfg(test)]
mod execution_parser_tests;

pub use execution_parser::{parse_executions, ExecutionLoad};
pub use plan_parser::parse_plan;
pub use table::RawTable;
