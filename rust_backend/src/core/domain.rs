//! Domain models for planned route assignments and executed cleaning runs.
//!
//! This module provides the data structures shared by the parsers, the
//! reconciler and the indicator computations: canonical weekdays, planned
//! assignments, execution records and the per-route tracking rows.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical day of the week, labelled in the dashboard locale (French).
///
/// Variants are ordered Monday first, matching ISO 8601.
///
/// # Examples
///
/// ```
/// use route_kpi::core::domain::Weekday;
///
/// assert_eq!(Weekday::Wednesday.label(), "Mercredi");
/// assert_eq!(Weekday::from_label(" mercredi "), Some(Weekday::Wednesday));
/// assert_eq!(Weekday::ALL.len(), 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    #[serde(rename = "Lundi")]
    Monday,
    #[serde(rename = "Mardi")]
    Tuesday,
    #[serde(rename = "Mercredi")]
    Wednesday,
    #[serde(rename = "Jeudi")]
    Thursday,
    #[serde(rename = "Vendredi")]
    Friday,
    #[serde(rename = "Samedi")]
    Saturday,
    #[serde(rename = "Dimanche")]
    Sunday,
}

impl Weekday {
    /// All seven days, Monday first.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Zero-based position of the day in the week (Monday = 0).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Label of the day in the dashboard locale.
    pub fn label(self) -> &'static str {
        match self {
            Weekday::Monday => "Lundi",
            Weekday::Tuesday => "Mardi",
            Weekday::Wednesday => "Mercredi",
            Weekday::Thursday => "Jeudi",
            Weekday::Friday => "Vendredi",
            Weekday::Saturday => "Samedi",
            Weekday::Sunday => "Dimanche",
        }
    }

    /// Parse a dashboard-locale label, ignoring case and surrounding whitespace.
    pub fn from_label(label: &str) -> Option<Weekday> {
        let wanted = label.trim();
        Weekday::ALL
            .into_iter()
            .find(|day| day.label().eq_ignore_ascii_case(wanted))
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        Weekday::ALL[day.num_days_from_monday() as usize]
    }
}

/// One route scheduled on one day of the plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedAssignment {
    pub weekday: Weekday,
    /// ISO week number of `date`
    pub calendar_week: u32,
    pub route_name: String,
    /// Calendar date derived from the cell position in the plan table
    pub date: NaiveDate,
}

impl PlannedAssignment {
    /// Creates an assignment dated `date`, deriving its ISO week.
    pub fn new(weekday: Weekday, route_name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            weekday,
            calendar_week: date.iso_week().week(),
            route_name: route_name.into(),
            date,
        }
    }
}

/// One completed cleaning run from the machine log.
///
/// Every measurement is optional: a cell that fails to parse is stored as
/// `None` instead of rejecting the whole run. `weekday` and `calendar_week`
/// are derived from `start_time` and are `None` whenever it is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionRecord {
    pub start_time: Option<NaiveDateTime>,
    pub end_time: Option<NaiveDateTime>,
    pub weekday: Option<Weekday>,
    pub calendar_week: Option<u32>,
    pub route_name: String,
    pub duration_minutes: Option<f64>,
    pub area_cleaned_sqm: Option<f64>,
    pub avg_speed_kmh: Option<f64>,
    pub productivity_sqm_per_h: Option<f64>,
    pub completion_pct: Option<f64>,
}

impl ExecutionRecord {
    /// Creates a record for `route_name` with the calendar fields derived from `start_time`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use route_kpi::core::domain::{ExecutionRecord, Weekday};
    ///
    /// let start = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap().and_hms_opt(6, 30, 0);
    /// let record = ExecutionRecord::new("Hall A", start);
    /// assert_eq!(record.weekday, Some(Weekday::Monday));
    /// assert_eq!(record.calendar_week, Some(3));
    /// ```
    pub fn new(route_name: impl Into<String>, start_time: Option<NaiveDateTime>) -> Self {
        Self {
            start_time,
            weekday: start_time.map(|t| t.weekday().into()),
            calendar_week: start_time.map(|t| t.iso_week().week()),
            route_name: route_name.into(),
            ..Default::default()
        }
    }

    /// Whether this run falls in ISO week `week`. Runs without a start time never do.
    pub fn in_week(&self, week: u32) -> bool {
        self.calendar_week == Some(week)
    }
}

/// Execution status of a planned route on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DayStatus {
    #[serde(rename = "Fait")]
    Done,
    #[default]
    #[serde(rename = "Pas fait")]
    NotDone,
}

impl DayStatus {
    pub fn label(self) -> &'static str {
        match self {
            DayStatus::Done => "Fait",
            DayStatus::NotDone => "Pas fait",
        }
    }

    pub fn is_done(self) -> bool {
        self == DayStatus::Done
    }
}

/// One line of the weekly tracking table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonRow {
    /// Canonical route key, the identity used for matching
    pub route_name: String,
    /// Planned spelling as first seen in the plan, trimmed
    pub label: String,
    /// Status per day, indexed by [`Weekday::index`]
    pub statuses: [DayStatus; 7],
}

impl ComparisonRow {
    /// Creates a row with every day marked [`DayStatus::NotDone`].
    pub fn new(route_name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            route_name: route_name.into(),
            label: label.into(),
            statuses: [DayStatus::NotDone; 7],
        }
    }

    pub fn status(&self, day: Weekday) -> DayStatus {
        self.statuses[day.index()]
    }

    pub fn set_status(&mut self, day: Weekday, status: DayStatus) {
        self.statuses[day.index()] = status;
    }

    /// Number of days marked [`DayStatus::Done`].
    pub fn done_count(&self) -> usize {
        self.statuses.iter().filter(|s| s.is_done()).count()
    }
}

/// Scalar indicators for one calendar week.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WeeklyIndicators {
    pub cumulative_hours: f64,
    pub cleaned_area_sqm: f64,
    pub avg_speed_kmh: f64,
    pub avg_productivity_sqm_per_h: f64,
    pub adherence_rate_pct: f64,
    pub completion_rate_pct: f64,
}

/// The two source snapshots every weekly query reads from.
///
/// Loaded once by the caller and shared by reference; nothing in the crate
/// mutates it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KpiDataset {
    pub planned: Vec<PlannedAssignment>,
    pub executions: Vec<ExecutionRecord>,
}

impl KpiDataset {
    pub fn new(planned: Vec<PlannedAssignment>, executions: Vec<ExecutionRecord>) -> Self {
        Self {
            planned,
            executions,
        }
    }
}
