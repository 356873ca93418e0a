//! Segment mapper
//!
//! [`SegmentMapper`] drives one segment occurrence through its policy: type
//! guard at construction, identity preconditions, the segment row and then
//! field extraction for every declared category.

use super::declarations::FieldDeclarations;
use super::extract::Extraction;
use super::outcome::{Diagnostic, MappingOutcome, Severity, Stage};
use super::policy::{RowContext, SegmentMappingPolicy};
use crate::core::segments;
use crate::datatypes::coercion::coerce_complex;
use crate::datatypes::{DatatypeRegistry, FieldCategory};
use crate::domain::{
    GroupId, IdentityContext, MessageId, Record, RecordSet, Result, Segment, StoreError,
};
use std::sync::Arc;

/// Maps one segment occurrence into a [`RecordSet`]
///
/// # Examples
///
/// ```
/// use hl7_store::core::mapping::SegmentMapper;
/// use hl7_store::domain::{MessageId, Segment, SegmentKind};
/// use serde_json::json;
///
/// let segment = Segment::new(SegmentKind::Ais)
///     .with_field("SetIdAis", json!("1"))
///     .with_field("Duration", json!(30))
///     .with_field("DurationUnits", json!({"Identifier": "MIN", "Text": "minutes"}));
///
/// let mut mapper = SegmentMapper::for_segment(&segment).unwrap();
/// mapper.set_message_id(MessageId::new("M1").unwrap());
///
/// let outcome = mapper.prepare().unwrap();
/// let row = &outcome.records.get("AIS")[0];
/// assert_eq!(row["ai_duration"], "30");
/// assert_eq!(row["ai_duration_units"], "MIN");
/// ```
#[derive(Debug)]
pub struct SegmentMapper<'a> {
    segment: &'a Segment,
    policy: SegmentMappingPolicy,
    identity: IdentityContext,
    extra: FieldDeclarations,
    records: RecordSet,
    registry: Arc<DatatypeRegistry>,
}

impl<'a> SegmentMapper<'a> {
    /// Creates a mapper for `segment` using its registered policy
    pub fn for_segment(segment: &'a Segment) -> Result<Self> {
        let policy = segments::policy_for(segment.kind())?;
        Self::with_policy(segment, policy)
    }

    /// Creates a mapper for `segment` using an explicit policy
    ///
    /// Fails with [`StoreError::InvalidSegmentType`] when the policy does not
    /// accept the segment's kind.
    pub fn with_policy(segment: &'a Segment, policy: SegmentMappingPolicy) -> Result<Self> {
        if !policy.accepts(segment.kind()) {
            return Err(StoreError::InvalidSegmentType {
                expected: policy.label().to_string(),
                actual: segment.kind().to_string(),
            });
        }

        let sequence_property = policy.sequence_property();
        let mut mapper = Self {
            segment,
            policy,
            identity: IdentityContext::default(),
            extra: FieldDeclarations::new(),
            records: RecordSet::new(),
            registry: DatatypeRegistry::standard(),
        };

        if let Some(property) = sequence_property {
            match coerce_complex(segment.get(property)) {
                Some(sid) => {
                    mapper.set_sid(sid);
                }
                None => mapper.identity.sid = None,
            }
        }

        Ok(mapper)
    }

    /// Replaces the casters and preparers used during extraction
    pub fn with_registry(mut self, registry: Arc<DatatypeRegistry>) -> Self {
        self.registry = registry;
        self
    }

    pub fn set_message_id(&mut self, message_id: MessageId) -> &mut Self {
        self.identity.message_id = Some(message_id);
        self
    }

    pub fn set_group_id(&mut self, group_id: GroupId) -> &mut Self {
        self.identity.group_id = group_id;
        self
    }

    pub fn set_group_entry(&mut self, group_entry: u32) -> &mut Self {
        self.identity.group_entry = group_entry;
        self
    }

    /// Overrides the sequence ID read from the segment
    pub(crate) fn set_sid(&mut self, sid: impl Into<String>) -> &mut Self {
        self.identity.sid = Some(sid.into());
        self
    }

    /// Appends fields to a category; repeated calls accumulate
    pub fn declare<I, S>(&mut self, category: FieldCategory, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra.declare(category, fields);
        self
    }

    pub fn set_cwe_fields<I, S>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.declare(FieldCategory::Cwe, fields)
    }

    pub fn set_cx_fields<I, S>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.declare(FieldCategory::Cx, fields)
    }

    pub fn set_xcn_fields<I, S>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.declare(FieldCategory::Xcn, fields)
    }

    pub fn set_xad_fields<I, S>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.declare(FieldCategory::Xad, fields)
    }

    pub fn set_xtn_fields<I, S>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.declare(FieldCategory::Xtn, fields)
    }

    pub fn set_pl_fields<I, S>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.declare(FieldCategory::Pl, fields)
    }

    /// Replaces the record set
    ///
    /// Fails with [`StoreError::RecordsAlreadySet`] when records are already
    /// present and `force` is false.
    pub fn set_records(&mut self, records: RecordSet, force: bool) -> Result<()> {
        if !force && !self.records.is_empty() {
            return Err(StoreError::RecordsAlreadySet);
        }
        self.records = records;
        Ok(())
    }

    /// Construction declarations, then the ones added on this mapper, then
    /// the policy's hook declarations
    pub fn declarations(&self) -> FieldDeclarations {
        self.policy.declarations_with(&self.extra)
    }

    pub fn identity(&self) -> &IdentityContext {
        &self.identity
    }

    pub fn records(&self) -> &RecordSet {
        &self.records
    }

    pub fn policy(&self) -> &SegmentMappingPolicy {
        &self.policy
    }

    pub fn segment(&self) -> &Segment {
        self.segment
    }

    /// Prepares the segment's records
    ///
    /// Fails with [`StoreError::MissingIdentity`] before touching any field
    /// when the message ID or sequence ID is unset. Every later failure is
    /// contained and reported in [`MappingOutcome::diagnostics`].
    pub fn prepare(self) -> Result<MappingOutcome> {
        if let Some(missing) = self.identity.missing_part() {
            return Err(StoreError::MissingIdentity(missing.to_string()));
        }

        let label = self.policy.label().to_string();
        let declarations = self.declarations();
        let mut records = self.records;
        let mut diagnostics = Vec::new();

        let row = {
            let mut ctx = RowContext::new(&label, &mut diagnostics);
            self.policy.build_row(self.segment, &mut ctx)
        };
        match row {
            Ok(Some(data)) => store_segment_fields(&mut records, &self.identity, &label, data),
            Ok(None) => {}
            Err(e) => {
                let diagnostic =
                    Diagnostic::new(Severity::Error, Stage::SegmentRow, &label, e.to_string());
                crate::log_contained_failure!(&diagnostic);
                diagnostics.push(diagnostic);
            }
        }

        let extraction = Extraction {
            segment: self.segment,
            label: &label,
            identity: &self.identity,
            registry: &self.registry,
        };
        for (category, fields) in declarations.iter() {
            let extracted = extraction.category(category, fields, &mut diagnostics);
            records.extend(category.as_str(), extracted);
        }

        let failures = diagnostics.iter().filter(|d| d.is_error()).count();
        crate::log_segment_mapped!(&label, records.len(), failures);

        Ok(MappingOutcome {
            segment: label,
            identity: self.identity,
            records,
            diagnostics,
        })
    }
}

/// Appends the segment row: identity stamp followed by the scalar columns
fn store_segment_fields(
    records: &mut RecordSet,
    identity: &IdentityContext,
    label: &str,
    data: Record,
) {
    let mut row = identity.stamp();
    row.extend(data);
    records.push(label, row);
}
