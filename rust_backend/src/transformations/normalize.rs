//! Canonical forms for route names, weekday labels and column headers.

use crate::core::domain::Weekday;
use crate::error::{KpiError, KpiResult};

/// Weekday names as written by the run logger, in day order.
const SOURCE_WEEKDAYS: [(&str, Weekday); 7] = [
    ("Monday", Weekday::Monday),
    ("Tuesday", Weekday::Tuesday),
    ("Wednesday", Weekday::Wednesday),
    ("Thursday", Weekday::Thursday),
    ("Friday", Weekday::Friday),
    ("Saturday", Weekday::Saturday),
    ("Sunday", Weekday::Sunday),
];

/// Canonical key for a route name: surrounding whitespace removed, lowercased.
///
/// Planned and executed routes are matched on this key only.
///
/// # Examples
///
/// ```
/// use route_kpi::transformations::normalize_route;
///
/// assert_eq!(normalize_route("  Hall A "), "hall a");
/// assert_eq!(normalize_route("HALL A"), normalize_route("hall a"));
/// ```
pub fn normalize_route(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Translate a source-locale (English) weekday name to its canonical day.
///
/// Matching ignores case and surrounding whitespace; anything outside the seven expected
/// names is rejected rather than dropped.
pub fn translate_weekday(name: &str) -> KpiResult<Weekday> {
    let wanted = name.trim();
    SOURCE_WEEKDAYS
        .iter()
        .find(|(source, _)| source.eq_ignore_ascii_case(wanted))
        .map(|(_, day)| *day)
        .ok_or_else(|| KpiError::UnknownWeekday(name.to_string()))
}

/// Parse a weekday written in either locale.
///
/// Dashboard-locale labels are tried first (case-insensitive), then the
/// source-locale translation table.
pub fn parse_weekday(name: &str) -> KpiResult<Weekday> {
    match Weekday::from_label(name) {
        Some(day) => Ok(day),
        None => translate_weekday(name),
    }
}

/// ASCII identifier for a column header.
///
/// Line breaks are removed (joining the words they split), bracketed unit
/// suffixes such as `[mn]` or `[km/h]` are stripped, accents are folded and
/// runs of whitespace, `_`, `-` or `.` collapse to a single `_`.
///
/// # Examples
///
/// ```
/// use route_kpi::transformations::column_key;
///
/// assert_eq!(column_key("Vitesse moyenne [km/h]"), "vitesse_moyenne");
/// assert_eq!(column_key("Productivité\r\nhoraire [mq/h]"), "productivitehoraire");
/// assert_eq!(column_key(" Début "), "debut");
/// ```
pub fn column_key(header: &str) -> String {
    let mut key = String::with_capacity(header.len());
    let mut in_unit = false;
    let mut pending_separator = false;

    for ch in header.chars() {
        match ch {
            '\r' | '\n' => continue,
            '[' => in_unit = true,
            ']' => in_unit = false,
            _ if in_unit => {}
            c if c.is_whitespace() || matches!(c, '_' | '-' | '.') => {
                pending_separator = !key.is_empty();
            }
            c => {
                for lower in c.to_lowercase() {
                    let folded = fold_accent(lower);
                    if !folded.is_ascii_alphanumeric() {
                        continue;
                    }
                    if pending_separator {
                        key.push('_');
                        pending_separator = false;
                    }
                    key.push(folded);
                }
            }
        }
    }

    key
}

/// Map a lowercase accented Latin letter to its ASCII base letter.
fn fold_accent(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_route_trims_and_lowercases() {
        assert_eq!(normalize_route(" a "), "a");
        assert_eq!(normalize_route("\tParcours 3\n"), "parcours 3");
        assert_eq!(normalize_route("   "), "");
    }

    #[test]
    fn test_normalize_route_keeps_inner_whitespace() {
        assert_ne!(normalize_route("hall  a"), normalize_route("hall a"));
    }

    #[test]
    fn test_translate_weekday_all_days() {
        for (name, day) in SOURCE_WEEKDAYS {
            assert_eq!(translate_weekday(name).unwrap(), day);
        }
    }

    #[test]
    fn test_translate_weekday_unknown() {
        let err = translate_weekday("Lunedi").unwrap_err();
        assert_eq!(err, KpiError::UnknownWeekday("Lunedi".to_string()));
        assert!(translate_weekday("").is_err());
    }

    #[test]
    fn test_weekday_locales_ignore_case() {
        assert_eq!(translate_weekday("MONDAY").unwrap(), Weekday::Monday);
        assert_eq!(parse_weekday(" sunday ").unwrap(), Weekday::Sunday);
        assert_eq!(parse_weekday("LUNDI").unwrap(), Weekday::Monday);
    }

    #[test]
    fn test_parse_weekday_either_locale() {
        assert_eq!(parse_weekday("Samedi").unwrap(), Weekday::Saturday);
        assert_eq!(parse_weekday("Saturday").unwrap(), Weekday::Saturday);
        assert!(matches!(
            parse_weekday("Someday"),
            Err(KpiError::UnknownWeekday(_))
        ));
    }

    #[test]
    fn test_column_key_log_headers() {
        assert_eq!(column_key("Parcours"), "parcours");
        assert_eq!(column_key("Fin"), "fin");
        assert_eq!(column_key("Durée[mn]"), "duree");
        assert_eq!(column_key("Surface\r\npropre [mq]"), "surfacepropre");
        assert_eq!(column_key("Terminer à [%]"), "terminer_a");
        assert_eq!(column_key("  start  time "), "start_time");
    }

    proptest! {
        #[test]
        fn prop_normalize_route_case_insensitive(s in "[a-zA-Z0-9 éèàç_-]{0,24}") {
            prop_assert_eq!(normalize_route(&s), normalize_route(&s.to_uppercase()));
        }

        #[test]
        fn prop_normalize_route_whitespace_insensitive(s in "[a-zA-Z0-9 éèàç_-]{0,24}") {
            let padded = format!("  {}  ", s);
            prop_assert_eq!(normalize_route(&s), normalize_route(&padded));
        }

        #[test]
        fn prop_column_key_is_ascii(s in "\\PC{0,32}") {
            let key = column_key(&s);
            prop_assert!(key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
            prop_assert!(!key.starts_with('_'));
            prop_assert!(!key.ends_with('_'));
        }
    }
}
