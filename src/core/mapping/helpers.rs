//! Convenience extractors shared by segment-row builders
//!
//! Both helpers swallow failures: a value that cannot be decomposed yields
//! `None` and a debug log line.

use crate::datatypes::typecast::{cast_coded_value, cast_entity_identifier};
use crate::domain::segment::is_absent_value;
use serde_json::Value;

/// Identifier of a coded unit (CWE), e.g. `MIN` out of `MIN^minutes^ISO+`
///
/// # Examples
///
/// ```
/// use hl7_store::core::mapping::helpers::prepare_units;
/// use serde_json::json;
///
/// assert_eq!(prepare_units(Some(&json!("MIN^minutes^ISO+"))).as_deref(), Some("MIN"));
/// assert_eq!(prepare_units(Some(&json!(true))), None);
/// assert_eq!(prepare_units(None), None);
/// ```
pub fn prepare_units(raw: Option<&Value>) -> Option<String> {
    let raw = raw.filter(|v| !is_absent_value(v))?;
    match cast_coded_value(raw) {
        Ok(component) => component.get("Identifier").map(str::to_string),
        Err(e) => {
            tracing::debug!(error = %e, "Discarding units value");
            None
        }
    }
}

/// Identifier part of an entity identifier (EI)
///
/// # Examples
///
/// ```
/// use hl7_store::core::mapping::helpers::prepare_entity_identifier;
/// use serde_json::json;
///
/// assert_eq!(
///     prepare_entity_identifier(Some(&json!({"EntityIdentifier": "APPT-7"}))).as_deref(),
///     Some("APPT-7")
/// );
/// ```
pub fn prepare_entity_identifier(raw: Option<&Value>) -> Option<String> {
    let raw = raw.filter(|v| !is_absent_value(v))?;
    match cast_entity_identifier(raw) {
        Ok(component) => component.get("EntityIdentifier").map(str::to_string),
        Err(e) => {
            tracing::debug!(error = %e, "Discarding entity identifier");
            None
        }
    }
}
