//! High-level data loading utilities.
//!
//! This module reads the plan and the run log from delimited text files,
//! handles encoding and malformed rows, and produces the typed snapshots the
//! services consume.
//!
//! # Example
//!
//! ```no_run
//! use route_kpi::config::KpiConfig;
//! use route_kpi::io::loaders::DatasetLoader;
//! use std::path::Path;
//!
//! let config = KpiConfig::default();
//! let result = DatasetLoader::load(
//!     Path::new("PLANNING.csv"),
//!     Path::new("runs.csv"),
//!     &config,
//! )
//! .expect("Failed to load");
//! println!("Loaded {} runs", result.dataset.executions.len());
//! ```

pub mod loaders;


pub use loaders::{BadRowPolicy, DatasetLoadResult, DatasetLoader, TableLoadResult, TableLoader};
