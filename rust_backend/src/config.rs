//! KPI configuration file support.
//!
//! This module reads the dashboard settings (plan epoch, nominal plan size,
//! thresholds, ingest options and column aliases) from a TOML file. Every
//! field has a default, so an empty file yields [`KpiConfig::default`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{KpiError, KpiResult};
use crate::services::indicators::DEFAULT_COMPLETION_THRESHOLD_PCT;

/// Complete KPI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KpiConfig {
    #[serde(default)]
    pub plan: PlanSettings,
    #[serde(default)]
    pub completion: CompletionSettings,
    #[serde(default)]
    pub gauge: GaugeSettings,
    #[serde(default)]
    pub ingest: IngestSettings,
    #[serde(default)]
    pub columns: ColumnAliases,
}

/// Plan dating and nominal plan size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSettings {
    /// Date of the first cell of the plan table
    #[serde(default = "default_epoch")]
    pub epoch: NaiveDate,
    #[serde(default = "default_days_per_week")]
    pub days_per_week: u32,
    #[serde(default = "default_routes_per_day")]
    pub routes_per_day: u32,
}

impl PlanSettings {
    /// Denominator of the adherence rate: slots in a nominal plan week.
    ///
    /// Saturates for sizes that [`KpiConfig::validate`] would reject.
    pub fn expected_slots(&self) -> u32 {
        self.days_per_week.saturating_mul(self.routes_per_day)
    }
}

impl Default for PlanSettings {
    fn default() -> Self {
        Self {
            epoch: default_epoch(),
            days_per_week: default_days_per_week(),
            routes_per_day: default_routes_per_day(),
        }
    }
}

/// Completion rate settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionSettings {
    /// Minimum average completion (in %) for a route to count as completed
    #[serde(default = "default_completion_threshold")]
    pub threshold_pct: f64,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            threshold_pct: default_completion_threshold(),
        }
    }
}

/// Gauge display settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaugeSettings {
    /// Start of the highlighted band on the 0-100 gauges
    #[serde(default = "default_good_threshold")]
    pub good_threshold_pct: f64,
}

impl Default for GaugeSettings {
    fn default() -> Self {
        Self {
            good_threshold_pct: default_good_threshold(),
        }
    }
}

/// Text encoding of the source CSV files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextEncoding {
    /// ISO-8859-1, as exported by the run logger
    #[default]
    Latin1,
    Utf8,
}

/// Options for reading the two source tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestSettings {
    #[serde(default = "default_delimiter")]
    pub plan_delimiter: char,
    #[serde(default = "default_delimiter")]
    pub execution_delimiter: char,
    #[serde(default)]
    pub encoding: TextEncoding,
    /// chrono format strings tried in order for start/end timestamps
    #[serde(default = "default_timestamp_formats")]
    pub timestamp_formats: Vec<String>,
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self {
            plan_delimiter: default_delimiter(),
            execution_delimiter: default_delimiter(),
            encoding: TextEncoding::default(),
            timestamp_formats: default_timestamp_formats(),
        }
    }
}

/// Normalized header names accepted for each execution field.
///
/// Aliases are compared against [`column_key`](crate::transformations::column_key)
/// of the source headers, so they must already be in that form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnAliases {
    #[serde(default = "default_start_time_aliases")]
    pub start_time: Vec<String>,
    #[serde(default = "default_end_time_aliases")]
    pub end_time: Vec<String>,
    #[serde(default = "default_route_aliases")]
    pub route: Vec<String>,
    #[serde(default = "default_duration_aliases")]
    pub duration: Vec<String>,
    #[serde(default = "default_area_aliases")]
    pub area: Vec<String>,
    #[serde(default = "default_speed_aliases")]
    pub speed: Vec<String>,
    #[serde(default = "default_productivity_aliases")]
    pub productivity: Vec<String>,
    #[serde(default = "default_completion_aliases")]
    pub completion: Vec<String>,
}

impl Default for ColumnAliases {
    fn default() -> Self {
        Self {
            start_time: default_start_time_aliases(),
            end_time: default_end_time_aliases(),
            route: default_route_aliases(),
            duration: default_duration_aliases(),
            area: default_area_aliases(),
            speed: default_speed_aliases(),
            productivity: default_productivity_aliases(),
            completion: default_completion_aliases(),
        }
    }
}

fn default_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or(NaiveDate::MIN)
}

fn default_days_per_week() -> u32 {
    7
}

fn default_routes_per_day() -> u32 {
    8
}

fn default_completion_threshold() -> f64 {
    DEFAULT_COMPLETION_THRESHOLD_PCT
}

fn default_good_threshold() -> f64 {
    50.0
}

fn default_delimiter() -> char {
    ';'
}

fn default_timestamp_formats() -> Vec<String> {
    vec!["%d/%m/%Y %H:%M".to_string(), "%d/%m/%Y %H:%M:%S".to_string()]
}

fn aliases(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn default_start_time_aliases() -> Vec<String> {
    aliases(&["debut", "start", "start_time"])
}

fn default_end_time_aliases() -> Vec<String> {
    aliases(&["fin", "end", "end_time"])
}

fn default_route_aliases() -> Vec<String> {
    aliases(&["parcours", "route", "route_name"])
}

fn default_duration_aliases() -> Vec<String> {
    aliases(&["duree", "duration", "duration_minutes"])
}

fn default_area_aliases() -> Vec<String> {
    aliases(&["surfacepropre", "surface_propre", "area_cleaned", "area_cleaned_sqm"])
}

fn default_speed_aliases() -> Vec<String> {
    aliases(&["vitesse_moyenne", "vitessemoyenne", "avg_speed", "avg_speed_kmh"])
}

fn default_productivity_aliases() -> Vec<String> {
    aliases(&[
        "productivitehoraire",
        "productivite_horaire",
        "productivity",
        "productivity_sqm_per_h",
    ])
}

fn default_completion_aliases() -> Vec<String> {
    aliases(&["terminera", "terminer_a", "completion", "completion_pct"])
}

impl KpiConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(KpiConfig)` if the file was read, parsed and validated
    /// * `Err(KpiError::ConfigurationError)` otherwise
    pub fn from_file<P: AsRef<Path>>(path: P) -> KpiResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            KpiError::ConfigurationError(format!("Failed to read config file: {}", e))
        })?;

        Self::parse(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn parse(content: &str) -> KpiResult<Self> {
        let config: KpiConfig = toml::from_str(content).map_err(|e| {
            KpiError::ConfigurationError(format!("Failed to parse config file: {}", e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `kpi.toml` in:
    /// 1. Current directory
    /// 2. `rust_backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> KpiResult<Self> {
        let search_paths = [
            PathBuf::from("kpi.toml"),
            PathBuf::from("rust_backend/kpi.toml"),
            PathBuf::from("../kpi.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                log::info!("Loading KPI configuration from {}", path.display());
                return Self::from_file(&path);
            }
        }

        Err(KpiError::ConfigurationError(
            "No kpi.toml found in standard locations".to_string(),
        ))
    }

    /// Check value ranges that the TOML schema cannot express.
    pub fn validate(&self) -> KpiResult<()> {
        if !(1..=7).contains(&self.plan.days_per_week) {
            return Err(KpiError::ConfigurationError(format!(
                "plan.days_per_week must be between 1 and 7, got {}",
                self.plan.days_per_week
            )));
        }

        if self
            .plan
            .days_per_week
            .checked_mul(self.plan.routes_per_day)
            .is_none()
        {
            return Err(KpiError::ConfigurationError(format!(
                "plan.routes_per_day is too large: {} × {} slots overflow",
                self.plan.days_per_week, self.plan.routes_per_day
            )));
        }

        for (name, value) in [
            ("completion.threshold_pct", self.completion.threshold_pct),
            ("gauge.good_threshold_pct", self.gauge.good_threshold_pct),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(KpiError::ConfigurationError(format!(
                    "{} must be between 0 and 100, got {}",
                    name, value
                )));
            }
        }

        for (name, delimiter) in [
            ("ingest.plan_delimiter", self.ingest.plan_delimiter),
            ("ingest.execution_delimiter", self.ingest.execution_delimiter),
        ] {
            if !delimiter.is_ascii() {
                return Err(KpiError::ConfigurationError(format!(
                    "{} must be a single ASCII character, got {:?}",
                    name, delimiter
                )));
            }
        }

        if self.ingest.timestamp_formats.is_empty() {
            return Err(KpiError::ConfigurationError(
                "ingest.timestamp_formats must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
