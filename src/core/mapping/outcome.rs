//! Result of preparing one segment
//!
//! Failures contained during `prepare` are not lost: each one becomes a
//! [`Diagnostic`] next to the records that were produced.

use crate::datatypes::FieldCategory;
use crate::domain::{IdentityContext, RecordSet};
use serde::Serialize;
use std::fmt;

/// Where a contained failure happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Building the scalar segment row
    SegmentRow,
    /// Decomposing a structured value
    TypeCast,
    /// Turning a decomposed value into records
    Prepare,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SegmentRow => "segment_row",
            Self::TypeCast => "type_cast",
            Self::Prepare => "prepare",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Data was unusable but nothing was dropped because of an error
    Warning,
    /// A value or the segment row was skipped
    Error,
}

/// One contained failure or warning
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub stage: Stage,
    pub segment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<FieldCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<usize>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(
        severity: Severity,
        stage: Stage,
        segment: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            stage,
            segment: segment.into(),
            category: None,
            field: None,
            entry: None,
            message: message.into(),
        }
    }

    /// Locates the diagnostic at one field value
    pub fn at(mut self, category: FieldCategory, field: impl Into<String>, entry: usize) -> Self {
        self.category = Some(category);
        self.field = Some(field.into());
        self.entry = Some(entry);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.segment, self.stage)?;
        if let (Some(category), Some(field)) = (self.category, &self.field) {
            write!(f, " {category} {field}")?;
            if let Some(entry) = self.entry {
                write!(f, "[{entry}]")?;
            }
        }
        write!(f, ": {}", self.message)
    }
}

/// Records produced by one `prepare` call, plus everything that was contained
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappingOutcome {
    /// Segment label the records were produced for
    pub segment: String,

    /// Identity stamped onto every record
    pub identity: IdentityContext,

    /// The prepared records, by table
    pub records: RecordSet,

    /// Contained failures and warnings, in the order they happened
    pub diagnostics: Vec<Diagnostic>,
}

impl MappingOutcome {
    /// Diagnostics that caused data to be skipped
    pub fn failures(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| !d.is_error())
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_display() {
        let diagnostic = Diagnostic::new(Severity::Error, Stage::TypeCast, "PID", "bad value")
            .at(FieldCategory::Xtn, "PatientTelecommunicationInformation", 2);
        assert_eq!(
            diagnostic.to_string(),
            "PID type_cast XTN PatientTelecommunicationInformation[2]: bad value"
        );
    }

    #[test]
    fn test_outcome_splits_failures_and_warnings() {
        let outcome = MappingOutcome {
            segment: "SCH".to_string(),
            identity: IdentityContext::default(),
            records: RecordSet::new(),
            diagnostics: vec![
                Diagnostic::new(Severity::Warning, Stage::SegmentRow, "SCH", "no timing"),
                Diagnostic::new(Severity::Error, Stage::Prepare, "SCH", "boom"),
            ],
        };

        assert_eq!(outcome.failures().count(), 1);
        assert_eq!(outcome.warnings().count(), 1);
        assert!(outcome.has_failures());
    }
}
