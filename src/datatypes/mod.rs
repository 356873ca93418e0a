//! Structured HL7v2 datatypes
//!
//! This module knows how to decompose the structured datatypes a segment policy
//! can declare (coded values, composite identifiers, names, addresses, telecom
//! numbers, locations) and how to turn a decomposed value into storage records.
//!
//! - [`component`] - component schemas and the normalized [`Component`] object
//! - [`typecast`] - raw value to [`Component`] ([`TypeCaster`])
//! - [`prepare`] - [`Component`] to storage records ([`FieldPreparer`])
//! - [`coercion`] - scalar date-time, string and complex-value coercion
//! - [`registry`] - the caster/preparer pair used for each [`FieldCategory`]

pub mod coercion;
pub mod component;
pub mod prepare;
pub mod registry;
pub mod typecast;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use component::Component;
pub use prepare::FieldPreparer;
pub use registry::DatatypeRegistry;
pub use typecast::TypeCaster;

/// Structured-datatype categories a segment can declare fields under
///
/// The declaration order of the variants is the order in which the mapping
/// engine extracts categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FieldCategory {
    /// Coded value with no exceptions
    Cwe,
    /// Extended composite ID with check digit
    Cx,
    /// Extended composite ID number and name for persons
    Xcn,
    /// Extended address
    Xad,
    /// Extended telecommunication number
    Xtn,
    /// Person location
    Pl,
}

impl FieldCategory {
    /// Every category, in extraction order
    pub const ALL: [FieldCategory; 6] = [
        FieldCategory::Cwe,
        FieldCategory::Cx,
        FieldCategory::Xcn,
        FieldCategory::Xad,
        FieldCategory::Xtn,
        FieldCategory::Pl,
    ];

    /// Table name used in a record set
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cwe => "CWE",
            Self::Cx => "CX",
            Self::Xcn => "XCN",
            Self::Xad => "XAD",
            Self::Xtn => "XTN",
            Self::Pl => "PL",
        }
    }

    /// Column prefix used by the default preparers
    pub fn column_prefix(self) -> &'static str {
        match self {
            Self::Cwe => "cwe",
            Self::Cx => "cx",
            Self::Xcn => "xcn",
            Self::Xad => "xad",
            Self::Xtn => "xtn",
            Self::Pl => "pl",
        }
    }

    /// Component names in HL7 positional order
    pub fn schema(self) -> &'static [&'static str] {
        match self {
            Self::Cwe => component::CWE_SCHEMA,
            Self::Cx => component::CX_SCHEMA,
            Self::Xcn => component::XCN_SCHEMA,
            Self::Xad => component::XAD_SCHEMA,
            Self::Xtn => component::XTN_SCHEMA,
            Self::Pl => component::PL_SCHEMA,
        }
    }
}

impl fmt::Display for FieldCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CWE" => Ok(Self::Cwe),
            "CX" => Ok(Self::Cx),
            "XCN" => Ok(Self::Xcn),
            "XAD" => Ok(Self::Xad),
            "XTN" => Ok(Self::Xtn),
            "PL" => Ok(Self::Pl),
            _ => Err(format!(
                "Invalid field category: {s}. Expected one of CWE, CX, XCN, XAD, XTN, PL"
            )),
        }
    }
}
