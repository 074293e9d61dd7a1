//! Single-cell parsers for numeric and timestamp fields.
//!
//! Failures are reported as [`ParseError`]; the record parsers turn them into
//! `None` so one bad cell never rejects a whole run.

use chrono::NaiveDateTime;

use crate::error::ParseError;

/// Parse a number written with either a decimal point or a decimal comma.
///
/// # Examples
///
/// ```
/// use route_kpi::parsing::fields::parse_decimal;
///
/// assert_eq!(parse_decimal("12,5"), Ok(12.5));
/// assert_eq!(parse_decimal(" 3.25 "), Ok(3.25));
/// assert!(parse_decimal("n/a").is_err());
/// ```
pub fn parse_decimal(text: &str) -> Result<f64, ParseError> {
    let normalized = text.trim().replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ParseError::new(text, "number")),
    }
}

/// Parse a timestamp with the first matching chrono format.
pub fn parse_timestamp<S: AsRef<str>>(
    text: &str,
    formats: &[S],
) -> Result<NaiveDateTime, ParseError> {
    let trimmed = text.trim();
    formats
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt.as_ref()).ok())
        .ok_or_else(|| ParseError::new(text, "timestamp"))
}
