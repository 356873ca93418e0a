//! Scalar coercion for segment-row columns
//!
//! These helpers never fail: anything they cannot make sense of becomes
//! `None`, which lands in the segment row as SQL `NULL`.

use super::component::{
    COMPONENT_SEPARATOR, CWE_SCHEMA, CX_SCHEMA, EI_SCHEMA, PL_SCHEMA, REPETITION_SEPARATOR,
    SUBCOMPONENT_SEPARATOR, XAD_SCHEMA, XCN_SCHEMA, XTN_SCHEMA,
};
use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;

/// Output format of normalized timestamps (MySQL `DATETIME`)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn dtm_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^(\d{4})(\d{2})?(\d{2})?(\d{2})?(\d{2})?(\d{2})?(?:\.\d{1,4})?(?:[+-]\d{4})?$",
        )
        .expect("DTM pattern is valid")
    })
}

/// Validates an HL7 date/time and normalizes it to `YYYY-MM-DD HH:MM:SS`
///
/// Accepts DTM text (`YYYY[MM[DD[HH[MM[SS[.S+]]]]]][+/-ZZZZ]`), a number holding
/// the same digits, an already normalized timestamp, or a TS-like object whose
/// first populated component holds the time. Missing month/day default to 01,
/// missing time parts to 00. The time-zone offset is dropped.
///
/// # Examples
///
/// ```
/// use hl7_store::datatypes::coercion::validate_date_time;
/// use serde_json::json;
///
/// assert_eq!(
///     validate_date_time(Some(&json!("202401010800"))).as_deref(),
///     Some("2024-01-01 08:00:00")
/// );
/// assert_eq!(validate_date_time(Some(&json!("20241301"))), None);
/// ```
pub fn validate_date_time(raw: Option<&Value>) -> Option<String> {
    let text = scalar_text(raw?)?;
    parse_date_time(&text).map(|dt| dt.format(TIMESTAMP_FORMAT).to_string())
}

fn parse_date_time(text: &str) -> Option<NaiveDateTime> {
    if let Some(caps) = dtm_pattern().captures(text) {
        let part = |i: usize, default: u32| -> Option<u32> {
            caps.get(i).map_or(Some(default), |m| m.as_str().parse().ok())
        };
        let year: i32 = caps.get(1)?.as_str().parse().ok()?;
        let date = NaiveDate::from_ymd_opt(year, part(2, 1)?, part(3, 1)?)?;
        return date.and_hms_opt(part(4, 0)?, part(5, 0)?, part(6, 0)?);
    }

    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Validates a plain string column
///
/// Returns the trimmed text of strings and numbers, the first component of
/// structured values, and `None` for anything empty.
pub fn validate_string(raw: Option<&Value>) -> Option<String> {
    scalar_text(raw?)
}

/// Text of a scalar or the first populated component of a structured value
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Object(map) => map.values().find_map(scalar_text),
        Value::Array(items) => items.iter().find_map(scalar_text),
        Value::Bool(_) | Value::Null => None,
    }
}

/// Renders any value as text, the way an HL7 encoder would
///
/// Strings and numbers are returned as-is, booleans as `true`/`false`,
/// structured objects re-encode their components with `^` (nested objects
/// with `&`) dropping trailing empty components, and repetitions join with `~`.
/// An object whose keys all belong to one datatype schema (CWE, CX, XCN, XAD,
/// XTN, PL, EI, tried in that order) is encoded in that schema's positional
/// order; any other object keeps its key order.
///
/// # Examples
///
/// ```
/// use hl7_store::datatypes::coercion::coerce_complex;
/// use serde_json::json;
///
/// assert_eq!(coerce_complex(Some(&json!(30))).as_deref(), Some("30"));
/// assert_eq!(
///     coerce_complex(Some(&json!({"Identifier": "NEW", "Text": null}))).as_deref(),
///     Some("NEW")
/// );
/// ```
pub fn coerce_complex(raw: Option<&Value>) -> Option<String> {
    let text = encode(raw?, COMPONENT_SEPARATOR);
    (!text.is_empty()).then_some(text)
}

fn encode(value: &Value, separator: char) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        Value::Array(items) => items
            .iter()
            .map(|item| encode(item, separator))
            .collect::<Vec<_>>()
            .join(&REPETITION_SEPARATOR.to_string()),
        Value::Object(map) => {
            let mut parts: Vec<String> = match positional_schema(map) {
                Some(schema) => schema
                    .iter()
                    .map(|name| {
                        map.get(*name)
                            .map(|v| encode(v, SUBCOMPONENT_SEPARATOR))
                            .unwrap_or_default()
                    })
                    .collect(),
                None => map.values().map(|v| encode(v, SUBCOMPONENT_SEPARATOR)).collect(),
            };
            while parts.last().is_some_and(String::is_empty) {
                parts.pop();
            }
            parts.join(&separator.to_string())
        }
    }
}

// Checked in order; the first schema naming every key wins
const POSITIONAL_SCHEMAS: &[&[&str]] = &[
    CWE_SCHEMA, CX_SCHEMA, XCN_SCHEMA, XAD_SCHEMA, XTN_SCHEMA, PL_SCHEMA, EI_SCHEMA,
];

fn positional_schema(map: &Map<String, Value>) -> Option<&'static [&'static str]> {
    POSITIONAL_SCHEMAS
        .iter()
        .copied()
        .find(|schema| map.keys().all(|key| schema.contains(&key.as_str())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test_case("2024", Some("2024-01-01 00:00:00"); "year only")]
    #[test_case("202403", Some("2024-03-01 00:00:00"); "year and month")]
    #[test_case("20240315", Some("2024-03-15 00:00:00"); "date")]
    #[test_case("202401010800", Some("2024-01-01 08:00:00"); "minutes")]
    #[test_case("20240101080059", Some("2024-01-01 08:00:59"); "seconds")]
    #[test_case("20240101080059.1234", Some("2024-01-01 08:00:59"); "fraction")]
    #[test_case("20240101080059-0500", Some("2024-01-01 08:00:59"); "offset")]
    #[test_case("2024-01-01 08:00:00", Some("2024-01-01 08:00:00"); "normalized")]
    #[test_case("2024-02-29", Some("2024-02-29 00:00:00"); "iso date")]
    #[test_case("20230229", None; "not a leap year")]
    #[test_case("20241301", None; "bad month")]
    #[test_case("202401012500", None; "bad hour")]
    #[test_case("2024010", None; "odd digit count")]
    #[test_case("yesterday", None; "text")]
    #[test_case("   ", None; "blank")]
    fn test_validate_date_time(input: &str, expected: Option<&str>) {
        assert_eq!(validate_date_time(Some(&json!(input))).as_deref(), expected);
    }

    #[test]
    fn test_validate_date_time_other_shapes() {
        assert_eq!(validate_date_time(None), None);
        assert_eq!(
            validate_date_time(Some(&json!(20240101))).as_deref(),
            Some("2024-01-01 00:00:00")
        );
        assert_eq!(
            validate_date_time(Some(&json!({"Time": "20240101120000", "DegreeOfPrecision": "S"})))
                .as_deref(),
            Some("2024-01-01 12:00:00")
        );
        assert_eq!(validate_date_time(Some(&json!(true))), None);
    }

    #[test]
    fn test_validate_string() {
        assert_eq!(validate_string(Some(&json!("  GOLD "))).as_deref(), Some("GOLD"));
        assert_eq!(validate_string(Some(&json!(""))), None);
        assert_eq!(validate_string(Some(&json!(12))).as_deref(), Some("12"));
        assert_eq!(
            validate_string(Some(&json!({"Identifier": "", "Text": "Plan"}))).as_deref(),
            Some("Plan")
        );
        assert_eq!(validate_string(None), None);
    }

    #[test]
    fn test_coerce_complex() {
        assert_eq!(coerce_complex(Some(&json!("NEW"))).as_deref(), Some("NEW"));
        assert_eq!(coerce_complex(Some(&json!(true))).as_deref(), Some("true"));
        assert_eq!(
            coerce_complex(Some(&json!({"A": "x", "B": "", "C": "z", "D": null}))).as_deref(),
            Some("x^^z")
        );
        assert_eq!(
            coerce_complex(Some(&json!({"A": {"N": "HOSP", "U": "1.2"}, "B": "y"}))).as_deref(),
            Some("HOSP&1.2^y")
        );
        assert_eq!(coerce_complex(Some(&json!(["a", "b"]))).as_deref(), Some("a~b"));
        assert_eq!(coerce_complex(Some(&json!({}))), None);
        assert_eq!(coerce_complex(Some(&json!(""))), None);
        assert_eq!(coerce_complex(None), None);
    }

    #[test]
    fn test_coerce_complex_uses_schema_positions() {
        assert_eq!(
            coerce_complex(Some(&json!({"Text": "minutes", "Identifier": "MIN"}))).as_deref(),
            Some("MIN^minutes")
        );
        assert_eq!(
            coerce_complex(Some(&json!({"NameOfCodingSystem": "ISO+", "Identifier": "MIN"})))
                .as_deref(),
            Some("MIN^^ISO+")
        );
        assert_eq!(
            coerce_complex(Some(&json!({"GivenName": "Jane", "FamilyName": "Doe"}))).as_deref(),
            Some("^Doe^Jane")
        );
    }
}
