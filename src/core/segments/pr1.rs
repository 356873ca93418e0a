//! PR1 (procedures)

use super::column;
use crate::core::mapping::{FieldDeclarations, RowContext, SegmentMappingPolicy};
use crate::datatypes::coercion::{coerce_complex, validate_date_time};
use crate::domain::{Record, Result, Segment, SegmentKind};

pub fn policy() -> SegmentMappingPolicy {
    SegmentMappingPolicy::new(SegmentKind::Pr1)
        .with_declarations(
            FieldDeclarations::new()
                .cwe([
                    "ProcedureCode",
                    "ProcedureFunctionalType",
                    "AnesthesiaCode",
                    "AssociatedDiagnosisCode",
                    "ProcedureCodeModifier",
                ])
                .xcn(["Surgeon", "Anesthesiologist"]),
        )
        .with_row(pr1_row)
}

fn pr1_row(segment: &Segment, _ctx: &mut RowContext<'_>) -> Result<Option<Record>> {
    let mut row = Record::new();
    column(
        &mut row,
        "procedure_description",
        coerce_complex(segment.get("ProcedureDescription")),
    );
    column(
        &mut row,
        "procedure_datetime",
        validate_date_time(segment.get("ProcedureDateTime")),
    );
    column(&mut row, "procedure_minutes", coerce_complex(segment.get("ProcedureMinutes")));
    column(
        &mut row,
        "procedure_anesthesia_minutes",
        coerce_complex(segment.get("AnesthesiaMinutes")),
    );
    Ok(Some(row))
}
