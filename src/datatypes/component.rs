//! Component schemas and the normalized component object
//!
//! A structured value arrives either as a JSON object keyed by component name
//! or as HL7-encoded text (`^` between components, `&` between
//! sub-components). Both decompose into the same [`Component`].

use crate::domain::TypeCastError;
use serde::Serialize;
use serde_json::Value;

pub const COMPONENT_SEPARATOR: char = '^';
pub const SUBCOMPONENT_SEPARATOR: char = '&';
pub const REPETITION_SEPARATOR: char = '~';

pub const CWE_SCHEMA: &[&str] = &[
    "Identifier",
    "Text",
    "NameOfCodingSystem",
    "AlternateIdentifier",
    "AlternateText",
    "NameOfAlternateCodingSystem",
    "CodingSystemVersionId",
    "AlternateCodingSystemVersionId",
    "OriginalText",
];

pub const CX_SCHEMA: &[&str] = &[
    "IdNumber",
    "IdentifierCheckDigit",
    "CheckDigitScheme",
    "AssigningAuthority",
    "IdentifierTypeCode",
    "AssigningFacility",
    "EffectiveDate",
    "ExpirationDate",
];

pub const XCN_SCHEMA: &[&str] = &[
    "IdNumber",
    "FamilyName",
    "GivenName",
    "SecondAndFurtherGivenNames",
    "Suffix",
    "Prefix",
    "Degree",
    "SourceTable",
    "AssigningAuthority",
    "NameTypeCode",
];

pub const XAD_SCHEMA: &[&str] = &[
    "StreetAddress",
    "OtherDesignation",
    "City",
    "StateOrProvince",
    "ZipOrPostalCode",
    "Country",
    "AddressType",
    "OtherGeographicDesignation",
    "CountyParishCode",
    "CensusTract",
];

pub const XTN_SCHEMA: &[&str] = &[
    "TelephoneNumber",
    "TelecommunicationUseCode",
    "TelecommunicationEquipmentType",
    "CommunicationAddress",
    "CountryCode",
    "AreaCityCode",
    "LocalNumber",
    "Extension",
    "AnyText",
];

pub const PL_SCHEMA: &[&str] = &[
    "PointOfCare",
    "Room",
    "Bed",
    "Facility",
    "LocationStatus",
    "PersonLocationType",
    "Building",
    "Floor",
    "LocationDescription",
];

/// Entity identifier, used by the entity-identifier helper only
pub const EI_SCHEMA: &[&str] = &[
    "EntityIdentifier",
    "NamespaceId",
    "UniversalId",
    "UniversalIdType",
];

/// A structured value decomposed into its named components
///
/// Components follow the datatype's schema order; components the raw value
/// did not carry are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Component {
    datatype: &'static str,
    parts: Vec<(&'static str, Option<String>)>,
}

impl Component {
    /// An all-empty component for a schema
    pub fn empty(datatype: &'static str, schema: &'static [&'static str]) -> Self {
        Self {
            datatype,
            parts: schema.iter().map(|name| (*name, None)).collect(),
        }
    }

    pub fn datatype(&self) -> &'static str {
        self.datatype
    }

    /// Value of a named component
    pub fn get(&self, name: &str) -> Option<&str> {
        self.parts
            .iter()
            .find(|(part, _)| *part == name)
            .and_then(|(_, value)| value.as_deref())
    }

    /// True when no component carries a value
    pub fn is_empty(&self) -> bool {
        self.parts.iter().all(|(_, value)| value.is_none())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Option<&str>)> + '_ {
        self.parts.iter().map(|(name, value)| (*name, value.as_deref()))
    }

    fn set(&mut self, index: usize, value: Option<String>) {
        if let Some(slot) = self.parts.get_mut(index) {
            slot.1 = value;
        }
    }
}

/// Decomposes a raw value against a component schema
///
/// # Errors
///
/// Returns a [`TypeCastError`] for booleans, nulls, arrays, objects naming a
/// component outside the schema, and encoded text with more components than
/// the schema holds.
pub fn decompose(
    datatype: &'static str,
    schema: &'static [&'static str],
    raw: &Value,
) -> Result<Component, TypeCastError> {
    let mut component = Component::empty(datatype, schema);

    match raw {
        Value::String(text) => {
            let pieces: Vec<&str> = text.split(COMPONENT_SEPARATOR).collect();
            if pieces.len() > schema.len() {
                return Err(TypeCastError::new(
                    datatype,
                    format!("'{text}'"),
                    format!(
                        "{} components exceed the {} defined for {datatype}",
                        pieces.len(),
                        schema.len()
                    ),
                ));
            }
            for (index, piece) in pieces.into_iter().enumerate() {
                component.set(index, first_subcomponent(piece));
            }
        }
        Value::Number(number) => component.set(0, Some(number.to_string())),
        Value::Object(map) => {
            for (key, value) in map {
                let index = schema.iter().position(|name| name == key).ok_or_else(|| {
                    TypeCastError::new(
                        datatype,
                        format!("component '{key}'"),
                        format!("not a {datatype} component"),
                    )
                })?;
                component.set(index, component_text(datatype, key, value)?);
            }
        }
        other => {
            return Err(TypeCastError::new(
                datatype,
                describe(other),
                "not a structured value",
            ))
        }
    }

    Ok(component)
}

/// Text of a single component inside a structured object
fn component_text(
    datatype: &'static str,
    key: &str,
    value: &Value,
) -> Result<Option<String>, TypeCastError> {
    match value {
        Value::Null => Ok(None),
        Value::String(text) => Ok(first_subcomponent(text)),
        Value::Number(number) => Ok(Some(number.to_string())),
        // Nested composites (HD, TS, ...) collapse to their first populated part
        Value::Object(map) => {
            for nested in map.values() {
                if let Some(text) = component_text(datatype, key, nested)? {
                    return Ok(Some(text));
                }
            }
            Ok(None)
        }
        other => Err(TypeCastError::new(
            datatype,
            format!("{} in component '{key}'", describe(other)),
            "components must be text, numbers or nested components",
        )),
    }
}

/// First non-empty sub-component of an encoded component, trimmed
fn first_subcomponent(piece: &str) -> Option<String> {
    piece
        .split(SUBCOMPONENT_SEPARATOR)
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// Short description of a JSON value for error messages
pub(crate) fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {b}"),
        Value::Number(n) => format!("number {n}"),
        Value::String(s) => format!("'{s}'"),
        Value::Array(items) => format!("array of {} values", items.len()),
        Value::Object(map) => format!("object with {} keys", map.len()),
    }
}

/// Converts a component name to a snake_case column suffix
///
/// `NameOfCodingSystem` becomes `name_of_coding_system`.
pub fn snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower);
            if boundary {
                out.push('_');
            }
        }
        out.extend(c.to_lowercase());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decompose_encoded_text() {
        let component = decompose("CWE", CWE_SCHEMA, &json!("MIN^minutes^ISO+")).unwrap();
        assert_eq!(component.get("Identifier"), Some("MIN"));
        assert_eq!(component.get("Text"), Some("minutes"));
        assert_eq!(component.get("NameOfCodingSystem"), Some("ISO+"));
        assert_eq!(component.get("AlternateIdentifier"), None);
    }

    #[test]
    fn test_decompose_subcomponents_take_first_value() {
        let component = decompose("CX", CX_SCHEMA, &json!("12345^^^HOSP&1.2.3&ISO^MR")).unwrap();
        assert_eq!(component.get("IdNumber"), Some("12345"));
        assert_eq!(component.get("AssigningAuthority"), Some("HOSP"));
        assert_eq!(component.get("IdentifierTypeCode"), Some("MR"));
    }

    #[test]
    fn test_decompose_object() {
        let component = decompose(
            "XCN",
            XCN_SCHEMA,
            &json!({
                "FamilyName": "Doe",
                "GivenName": "Jane",
                "AssigningAuthority": {"NamespaceId": "HOSP"}
            }),
        )
        .unwrap();
        assert_eq!(component.get("FamilyName"), Some("Doe"));
        assert_eq!(component.get("GivenName"), Some("Jane"));
        assert_eq!(component.get("AssigningAuthority"), Some("HOSP"));
        assert_eq!(component.get("IdNumber"), None);
    }

    #[test]
    fn test_decompose_number() {
        let component = decompose("EI", EI_SCHEMA, &json!(42)).unwrap();
        assert_eq!(component.get("EntityIdentifier"), Some("42"));
    }

    #[test]
    fn test_decompose_rejects_unknown_component() {
        let err = decompose("CWE", CWE_SCHEMA, &json!({"Bogus": "x"})).unwrap_err();
        assert_eq!(err.category, "CWE");
        assert!(err.found.contains("Bogus"));
    }

    #[test]
    fn test_decompose_rejects_too_many_components() {
        let err = decompose("EI", EI_SCHEMA, &json!("a^b^c^d^e")).unwrap_err();
        assert!(err.reason.contains("5 components exceed the 4"));
    }

    #[test]
    fn test_decompose_rejects_non_structured() {
        assert!(decompose("XTN", XTN_SCHEMA, &json!(true)).is_err());
        assert!(decompose("XTN", XTN_SCHEMA, &json!(["a"])).is_err());
        assert!(decompose("XTN", XTN_SCHEMA, &json!({"TelephoneNumber": [1]})).is_err());
    }

    #[test]
    fn test_empty_component() {
        let component = decompose("PL", PL_SCHEMA, &json!("^^")).unwrap();
        assert!(component.is_empty());
    }

    #[test]
    fn test_snake_case() {
        assert_eq!(snake_case("NameOfCodingSystem"), "name_of_coding_system");
        assert_eq!(snake_case("IdNumber"), "id_number");
        assert_eq!(snake_case("SecondAndFurtherGivenNames"), "second_and_further_given_names");
        assert_eq!(snake_case("CodingSystemVersionId"), "coding_system_version_id");
        assert_eq!(snake_case("Room"), "room");
    }
}
