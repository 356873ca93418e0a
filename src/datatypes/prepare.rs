//! Field preparers: normalized components to storage records
//!
//! Each record a preparer emits starts with the identity stamp, then names the
//! source segment, field and repetition, then carries one column per component.

use super::component::{snake_case, Component};
use super::FieldCategory;
use crate::domain::{FieldPrepareError, IdentityContext, Record};
use serde_json::{json, Value};

pub const SEGMENT_COLUMN: &str = "msg_segment";
pub const FIELD_COLUMN: &str = "msg_field";
pub const ENTRY_COLUMN: &str = "field_entry";

/// Turns a normalized component into zero, one or many storage records
pub trait FieldPreparer: Send + Sync {
    /// Prepares the records for one field value
    ///
    /// # Arguments
    ///
    /// * `field` - Source property name, e.g. `PatientName`
    /// * `component` - The type-cast value
    /// * `identity` - Identity stamped onto every record
    /// * `segment` - Segment label, e.g. `PID`
    /// * `entry` - 1-based repetition index of the value within its field
    fn prepare(
        &self,
        field: &str,
        component: &Component,
        identity: &IdentityContext,
        segment: &str,
        entry: usize,
    ) -> Result<Vec<Record>, FieldPrepareError>;
}

/// Record head shared by all preparers
pub fn base_record(identity: &IdentityContext, segment: &str, field: &str, entry: usize) -> Record {
    let mut record = identity.stamp();
    record.insert(SEGMENT_COLUMN.to_string(), json!(segment));
    record.insert(FIELD_COLUMN.to_string(), json!(field));
    record.insert(ENTRY_COLUMN.to_string(), json!(entry));
    record
}

fn text(value: Option<&str>) -> Value {
    value.map_or(Value::Null, |v| json!(v))
}

/// One record per value, one `<prefix>_<component>` column per schema component
///
/// Used for CX, XCN, XAD, XTN and PL.
#[derive(Debug, Clone, Copy)]
pub struct ColumnPreparer {
    category: FieldCategory,
}

impl ColumnPreparer {
    pub fn new(category: FieldCategory) -> Self {
        Self { category }
    }
}

impl FieldPreparer for ColumnPreparer {
    fn prepare(
        &self,
        field: &str,
        component: &Component,
        identity: &IdentityContext,
        segment: &str,
        entry: usize,
    ) -> Result<Vec<Record>, FieldPrepareError> {
        if component.is_empty() {
            return Ok(Vec::new());
        }
        let prefix = self.category.column_prefix();
        let mut record = base_record(identity, segment, field, entry);
        for (name, value) in component.iter() {
            record.insert(format!("{prefix}_{}", snake_case(name)), text(value));
        }
        Ok(vec![record])
    }
}

/// Coded-value preparer
///
/// Emits a `primary` record for the main coding and an `alternate` record when
/// the value also carries an alternate coding. Both share the same entry index.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodedValuePreparer;

impl CodedValuePreparer {
    fn coding(
        base: &Record,
        rank: &str,
        identifier: Option<&str>,
        text_value: Option<&str>,
        system: Option<&str>,
        version: Option<&str>,
        original_text: Option<&str>,
    ) -> Record {
        let mut record = base.clone();
        record.insert("cwe_identifier".to_string(), text(identifier));
        record.insert("cwe_text".to_string(), text(text_value));
        record.insert("cwe_coding_system".to_string(), text(system));
        record.insert("cwe_coding_system_version".to_string(), text(version));
        record.insert("cwe_original_text".to_string(), text(original_text));
        record.insert("cwe_coding_rank".to_string(), json!(rank));
        record
    }
}

impl FieldPreparer for CodedValuePreparer {
    fn prepare(
        &self,
        field: &str,
        component: &Component,
        identity: &IdentityContext,
        segment: &str,
        entry: usize,
    ) -> Result<Vec<Record>, FieldPrepareError> {
        if component.is_empty() {
            return Ok(Vec::new());
        }
        let base = base_record(identity, segment, field, entry);
        let original_text = component.get("OriginalText");
        let mut records = Vec::with_capacity(2);

        let identifier = component.get("Identifier");
        let text_value = component.get("Text");
        if identifier.is_some() || text_value.is_some() || original_text.is_some() {
            records.push(Self::coding(
                &base,
                "primary",
                identifier,
                text_value,
                component.get("NameOfCodingSystem"),
                component.get("CodingSystemVersionId"),
                original_text,
            ));
        }

        let alternate_identifier = component.get("AlternateIdentifier");
        let alternate_text = component.get("AlternateText");
        if alternate_identifier.is_some() || alternate_text.is_some() {
            records.push(Self::coding(
                &base,
                "alternate",
                alternate_identifier,
                alternate_text,
                component.get("NameOfAlternateCodingSystem"),
                component.get("AlternateCodingSystemVersionId"),
                original_text,
            ));
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatypes::typecast::{SchemaCaster, TypeCaster};
    use crate::domain::MessageId;
    use serde_json::json;

    fn identity() -> IdentityContext {
        IdentityContext {
            message_id: Some(MessageId::new("M1").unwrap()),
            ..IdentityContext::default()
        }
    }

    fn cast(category: FieldCategory, raw: Value) -> Component {
        SchemaCaster::new(category).typecast(&raw).unwrap()
    }

    #[test]
    fn test_column_preparer_record_shape() {
        let component = cast(FieldCategory::Xtn, json!("(555)555-1234^PRN^PH"));
        let records = ColumnPreparer::new(FieldCategory::Xtn)
            .prepare("PatientTelecommunicationInformation", &component, &identity(), "PID", 2)
            .unwrap();

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record["msg_id"], "M1");
        assert_eq!(record["msg_segment"], "PID");
        assert_eq!(record["msg_field"], "PatientTelecommunicationInformation");
        assert_eq!(record["field_entry"], 2);
        assert_eq!(record["xtn_telephone_number"], "(555)555-1234");
        assert_eq!(record["xtn_telecommunication_use_code"], "PRN");
        assert!(record["xtn_extension"].is_null());
    }

    #[test]
    fn test_column_preparer_skips_empty_component() {
        let component = cast(FieldCategory::Pl, json!("^^"));
        let records = ColumnPreparer::new(FieldCategory::Pl)
            .prepare("TemporaryLocation", &component, &identity(), "PV1", 1)
            .unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_coded_value_single_coding() {
        let component = cast(FieldCategory::Cwe, json!("F^Female^HL70001"));
        let records = CodedValuePreparer
            .prepare("AdministrativeSex", &component, &identity(), "PID", 1)
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["cwe_identifier"], "F");
        assert_eq!(records[0]["cwe_coding_system"], "HL70001");
        assert_eq!(records[0]["cwe_coding_rank"], "primary");
    }

    #[test]
    fn test_coded_value_expands_alternate_coding() {
        let component = cast(
            FieldCategory::Cwe,
            json!("I10^Essential hypertension^I10C^401.9^HTN^I9C"),
        );
        let records = CodedValuePreparer
            .prepare("DiagnosisCodeDg1", &component, &identity(), "DG1", 1)
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["cwe_identifier"], "I10");
        assert_eq!(records[1]["cwe_identifier"], "401.9");
        assert_eq!(records[1]["cwe_coding_system"], "I9C");
        assert_eq!(records[1]["cwe_coding_rank"], "alternate");
        assert_eq!(records[0]["field_entry"], records[1]["field_entry"]);
    }
}
