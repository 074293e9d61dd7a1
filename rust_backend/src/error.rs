//! Error types for KPI computation and table parsing.

/// Result type for core and parsing operations
pub type KpiResult<T> = Result<T, KpiError>;

/// Structural errors surfaced to the caller.
///
/// Noisy data points never produce a `KpiError`; they are coerced to `None`
/// at the parse boundary (see [`ParseError`]).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KpiError {
    #[error("Unknown weekday: {0:?}")]
    UnknownWeekday(String),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Invalid week number: {0} (expected 1-53)")]
    InvalidWeek(u32),

    #[error("Malformed table: {0}")]
    MalformedTable(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

/// A single cell that could not be parsed into its expected type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot parse {value:?} as {expected}")]
pub struct ParseError {
    pub value: String,
    pub expected: &'static str,
}

impl ParseError {
    pub fn new(value: impl Into<String>, expected: &'static str) -> Self {
        Self {
            value: value.into(),
            expected,
        }
    }
}
