//! Service layer computing the weekly dashboard data.
//!
//! Services are pure functions of the selected week and the two source
//! snapshots. They hold no state between calls, so the same inputs always give
//! the same outputs and independent weeks can be computed in parallel.

pub mod indicators;
pub mod reconcile;
pub mod report;

pub use indicators::{
    adherence_rate, avg_productivity, avg_speed, cleaned_area, completion_rate, cumulative_hours,
    weekly_indicators,
};
pub use reconcile::build_comparison;
pub use report::{build_weekly_report, Gauge, GaugeBand, WeeklyReport};
