//! Segment domain model
//!
//! A [`Segment`] is one already-parsed HL7v2 segment: a kind tag plus named
//! properties. Property values are plain JSON: a string or object for a single
//! value, an array for a repeated field, `null` or a missing key for absence.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// HL7v2 segment kinds known to the mapping policies
///
/// Any other segment name round-trips through [`SegmentKind::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SegmentKind {
    Aig,
    Ail,
    Aip,
    Ais,
    Dg1,
    In1,
    Nte,
    Pd1,
    Pid,
    Pr1,
    Pv1,
    Pv2,
    Sch,
    Other(String),
}

impl SegmentKind {
    /// The three-letter segment tag
    pub fn as_str(&self) -> &str {
        match self {
            Self::Aig => "AIG",
            Self::Ail => "AIL",
            Self::Aip => "AIP",
            Self::Ais => "AIS",
            Self::Dg1 => "DG1",
            Self::In1 => "IN1",
            Self::Nte => "NTE",
            Self::Pd1 => "PD1",
            Self::Pid => "PID",
            Self::Pr1 => "PR1",
            Self::Pv1 => "PV1",
            Self::Pv2 => "PV2",
            Self::Sch => "SCH",
            Self::Other(name) => name,
        }
    }
}

impl From<&str> for SegmentKind {
    fn from(name: &str) -> Self {
        match name.trim().to_uppercase().as_str() {
            "AIG" => Self::Aig,
            "AIL" => Self::Ail,
            "AIP" => Self::Aip,
            "AIS" => Self::Ais,
            "DG1" => Self::Dg1,
            "IN1" => Self::In1,
            "NTE" => Self::Nte,
            "PD1" => Self::Pd1,
            "PID" => Self::Pid,
            "PR1" => Self::Pr1,
            "PV1" => Self::Pv1,
            "PV2" => Self::Pv2,
            "SCH" => Self::Sch,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for SegmentKind {
    fn from(name: String) -> Self {
        Self::from(name.as_str())
    }
}

impl From<SegmentKind> for String {
    fn from(kind: SegmentKind) -> Self {
        kind.as_str().to_string()
    }
}

impl FromStr for SegmentKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named property as read off a segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Property<'a> {
    /// Missing key, `null`, empty string or empty sequence
    Absent,
    /// One value
    Single(&'a Value),
    /// An ordered sequence of repetitions
    Repeated(&'a [Value]),
}

impl<'a> Property<'a> {
    /// First value of the property, whether single or repeated
    pub fn first(&self) -> Option<&'a Value> {
        match self {
            Self::Absent => None,
            Self::Single(value) => Some(value),
            Self::Repeated(values) => values.first(),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

/// Returns true for values that carry no data
pub fn is_absent_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// One parsed HL7v2 segment
///
/// # Examples
///
/// ```
/// use hl7_store::domain::segment::{Segment, SegmentKind};
/// use serde_json::json;
///
/// let pid = Segment::new(SegmentKind::Pid)
///     .with_field("SetIdPid", json!("1"))
///     .with_field("PatientName", json!(["DOE^JOHN", "DOE^JONATHAN"]));
///
/// assert_eq!(pid.kind(), &SegmentKind::Pid);
/// assert!(pid.property("PatientName").first().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Segment tag
    #[serde(rename = "segment")]
    kind: SegmentKind,

    /// Named properties
    #[serde(default)]
    fields: Map<String, Value>,
}

impl Segment {
    /// Creates an empty segment of the given kind
    pub fn new(kind: SegmentKind) -> Self {
        Self {
            kind,
            fields: Map::new(),
        }
    }

    /// Creates a segment from an existing property map
    pub fn from_fields(kind: SegmentKind, fields: Map<String, Value>) -> Self {
        Self { kind, fields }
    }

    /// Adds or replaces a property
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    pub fn kind(&self) -> &SegmentKind {
        &self.kind
    }

    /// Raw access to a property value, `None` when it carries no data
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name).filter(|v| !is_absent_value(v))
    }

    /// Reads a property, classifying it as absent, single or repeated
    pub fn property(&self, name: &str) -> Property<'_> {
        match self.get(name) {
            None => Property::Absent,
            Some(Value::Array(items)) => Property::Repeated(items),
            Some(value) => Property::Single(value),
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}
