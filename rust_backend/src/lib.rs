//! Route KPI backend - weekly tracking of planned vs. executed cleaning routes.
//!
//! The crate reconciles a weekday route plan with the log of completed
//! cleaning runs and derives the weekly indicators shown on the dashboard.
//!
//! - [`transformations`]: Route, weekday and column-header normalization
//! - [`parsing`] / [`io`]: Typed records from the two source tables
//! - [`services`]: Tracking table, indicators and the weekly report
//! - [`config`]: TOML configuration

pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod parsing;
pub mod services;
pub mod transformations;

pub use config::KpiConfig;
pub use error::{KpiError, KpiResult, ParseError};
