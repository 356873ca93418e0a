//! Declarative per-segment mapping policies
//!
//! A policy is plain data plus one function: which segment kind it maps, where
//! the segment keeps its own sequence number, which properties go under which
//! structured-datatype category, and how the scalar segment row is built.

use super::declarations::FieldDeclarations;
use super::outcome::{Diagnostic, Severity, Stage};
use crate::domain::{Record, Result, Segment, SegmentKind};
use std::fmt;

/// Builds the scalar columns of a segment row
///
/// Returns `Ok(None)` for segments without a row of their own.
pub type RowBuilder = fn(&Segment, &mut RowContext<'_>) -> Result<Option<Record>>;

/// Side channel a row builder reports non-fatal problems through
pub struct RowContext<'a> {
    segment: &'a str,
    diagnostics: &'a mut Vec<Diagnostic>,
}

impl<'a> RowContext<'a> {
    pub(crate) fn new(segment: &'a str, diagnostics: &'a mut Vec<Diagnostic>) -> Self {
        Self {
            segment,
            diagnostics,
        }
    }

    /// Segment label the row is built for
    pub fn segment(&self) -> &str {
        self.segment
    }

    /// Records a warning; the row is still stored
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(segment = %self.segment, message = %message, "Segment row warning");
        self.diagnostics.push(Diagnostic::new(
            Severity::Warning,
            Stage::SegmentRow,
            self.segment,
            message,
        ));
    }
}

/// Mapping rules for one segment kind
///
/// # Examples
///
/// ```
/// use hl7_store::core::mapping::{FieldDeclarations, SegmentMappingPolicy};
/// use hl7_store::domain::SegmentKind;
///
/// let policy = SegmentMappingPolicy::new(SegmentKind::Pd1)
///     .with_declarations(FieldDeclarations::new().cwe(["LivingArrangement"]));
///
/// assert_eq!(policy.label(), "PD1");
/// assert!(policy.sequence_property().is_none());
/// ```
#[derive(Clone)]
pub struct SegmentMappingPolicy {
    kind: SegmentKind,
    sequence_property: Option<&'static str>,
    construction: FieldDeclarations,
    declarations: FieldDeclarations,
    row: RowBuilder,
}

impl SegmentMappingPolicy {
    /// A policy with no declarations and no segment row
    pub fn new(kind: SegmentKind) -> Self {
        Self {
            kind,
            sequence_property: None,
            construction: FieldDeclarations::new(),
            declarations: FieldDeclarations::new(),
            row: no_row,
        }
    }

    /// Property holding the segment's own sequence number, e.g. `SetIdPid`
    pub fn with_sequence_property(mut self, property: &'static str) -> Self {
        self.sequence_property = Some(property);
        self
    }

    /// Declarations in place as soon as a mapper is built; caller
    /// declarations are appended after them
    pub fn with_construction_declarations(mut self, declarations: FieldDeclarations) -> Self {
        self.construction = declarations;
        self
    }

    /// Declarations contributed while preparing, after caller declarations
    pub fn with_declarations(mut self, declarations: FieldDeclarations) -> Self {
        self.declarations = declarations;
        self
    }

    pub fn with_row(mut self, row: RowBuilder) -> Self {
        self.row = row;
        self
    }

    /// Segment kind this policy maps
    pub fn kind(&self) -> &SegmentKind {
        &self.kind
    }

    /// Table name of the segment row
    pub fn label(&self) -> &str {
        self.kind.as_str()
    }

    pub fn sequence_property(&self) -> Option<&'static str> {
        self.sequence_property
    }

    pub fn construction_declarations(&self) -> &FieldDeclarations {
        &self.construction
    }

    pub fn hook_declarations(&self) -> &FieldDeclarations {
        &self.declarations
    }

    /// Construction declarations followed by hook declarations
    pub fn declarations(&self) -> FieldDeclarations {
        self.construction.merged(&self.declarations)
    }

    /// Order used by `prepare`: construction, then `extra`, then hook
    pub fn declarations_with(&self, extra: &FieldDeclarations) -> FieldDeclarations {
        self.construction.merged(extra).merged(&self.declarations)
    }

    pub fn accepts(&self, kind: &SegmentKind) -> bool {
        &self.kind == kind
    }

    pub(crate) fn build_row(
        &self,
        segment: &Segment,
        ctx: &mut RowContext<'_>,
    ) -> Result<Option<Record>> {
        (self.row)(segment, ctx)
    }
}

impl fmt::Debug for SegmentMappingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegmentMappingPolicy")
            .field("kind", &self.kind)
            .field("sequence_property", &self.sequence_property)
            .field("construction", &self.construction)
            .field("declarations", &self.declarations)
            .finish_non_exhaustive()
    }
}

fn no_row(_: &Segment, _: &mut RowContext<'_>) -> Result<Option<Record>> {
    Ok(None)
}
