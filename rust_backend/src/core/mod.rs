//! Core domain models for route planning and cleaning runs.
//!
//! This module defines the data structures used throughout the crate,
//! representing planned assignments, executed runs and the weekly tracking table.

pub mod domain;

pub use domain::{
    ComparisonRow, DayStatus, ExecutionRecord, KpiDataset, PlannedAssignment, Weekday,
    WeeklyIndicators,
};
