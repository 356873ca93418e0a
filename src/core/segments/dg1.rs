//! DG1 (diagnosis)

use super::column;
use crate::core::mapping::helpers::prepare_entity_identifier;
use crate::core::mapping::{FieldDeclarations, RowContext, SegmentMappingPolicy};
use crate::datatypes::coercion::{validate_date_time, validate_string};
use crate::domain::{Record, Result, Segment, SegmentKind};

pub fn policy() -> SegmentMappingPolicy {
    SegmentMappingPolicy::new(SegmentKind::Dg1)
        .with_sequence_property("SetIdDg1")
        .with_declarations(
            FieldDeclarations::new()
                .cwe(["DiagnosisCodeDg1", "DiagnosisType", "DiagnosisClassification"])
                .xcn(["DiagnosingClinician"]),
        )
        .with_row(dg1_row)
}

fn dg1_row(segment: &Segment, _ctx: &mut RowContext<'_>) -> Result<Option<Record>> {
    let mut row = Record::new();
    column(&mut row, "diag_datetime", validate_date_time(segment.get("DiagnosisDateTime")));
    column(
        &mut row,
        "diag_description",
        validate_string(segment.get("DiagnosisDescription")),
    );
    column(
        &mut row,
        "diag_attest_datetime",
        validate_date_time(segment.get("AttestationDateTime")),
    );
    column(
        &mut row,
        "diag_identifier",
        prepare_entity_identifier(segment.get("DiagnosisIdentifier")),
    );
    Ok(Some(row))
}
