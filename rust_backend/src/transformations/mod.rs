//! Normalization utilities applied before planned and executed data are compared.
//!
//! # Modules
//!
//! - [`normalize`]: Canonical route keys, weekday translation, column header keys
//!
//! # Example
//!
//! ```
//! use route_kpi::core::domain::Weekday;
//! use route_kpi::transformations::{normalize_route, translate_weekday};
//!
//! assert_eq!(normalize_route(" Hall A "), "hall a");
//! assert_eq!(translate_weekday("Monday").unwrap(), Weekday::Monday);
//! ```

pub mod normalize;

pub use normalize::{column_key, normalize_route, parse_weekday, translate_weekday};
