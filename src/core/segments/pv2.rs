//! PV2 (patient visit, additional information)

use super::column;
use crate::core::mapping::{FieldDeclarations, RowContext, SegmentMappingPolicy};
use crate::datatypes::coercion::{coerce_complex, validate_date_time};
use crate::domain::{Record, Result, Segment, SegmentKind};

pub fn policy() -> SegmentMappingPolicy {
    SegmentMappingPolicy::new(SegmentKind::Pv2)
        .with_declarations(
            FieldDeclarations::new()
                .cwe(["AccommodationCode", "AdmitReason", "TransferReason", "PatientStatusCode"])
                .xcn(["ReferralSourceCode"])
                .pl(["PriorPendingLocation", "TemporaryLocation"]),
        )
        .with_row(pv2_row)
}

fn pv2_row(segment: &Segment, _ctx: &mut RowContext<'_>) -> Result<Option<Record>> {
    let mut row = Record::new();
    column(
        &mut row,
        "pv_admit_datetime",
        validate_date_time(segment.get("ExpectedAdmitDateTime")),
    );
    column(
        &mut row,
        "pv_discharge_datetime",
        validate_date_time(segment.get("ExpectedDischargeDateTime")),
    );
    column(&mut row, "pv_description", coerce_complex(segment.get("VisitDescription")));
    Ok(Some(row))
}
