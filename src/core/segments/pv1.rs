//! PV1 (patient visit)

use super::column;
use crate::core::mapping::{FieldDeclarations, RowContext, SegmentMappingPolicy};
use crate::datatypes::coercion::validate_date_time;
use crate::domain::{Record, Result, Segment, SegmentKind};

pub fn policy() -> SegmentMappingPolicy {
    SegmentMappingPolicy::new(SegmentKind::Pv1)
        .with_sequence_property("SetIdPv1")
        .with_declarations(
            FieldDeclarations::new()
                .cwe([
                    "PatientClass",
                    "AdmissionType",
                    "AccountStatus",
                    "DischargeDisposition",
                    "AdmitSource",
                    "PatientType",
                    "HospitalService",
                ])
                .cx(["VisitNumber"])
                .xcn(["AttendingDoctor", "ReferringDoctor", "AdmittingDoctor"])
                .pl([
                    "AssignedPatientLocation",
                    "PriorPatientLocation",
                    "TemporaryLocation",
                ]),
        )
        .with_row(pv1_row)
}

fn pv1_row(segment: &Segment, _ctx: &mut RowContext<'_>) -> Result<Option<Record>> {
    let mut row = Record::new();
    column(&mut row, "pv1_admit_datetime", validate_date_time(segment.get("AdmitDateTime")));
    // DischargeDateTime repeats; only the first one is stored
    column(
        &mut row,
        "pv1_discharge_datetime",
        validate_date_time(segment.property("DischargeDateTime").first()),
    );
    Ok(Some(row))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_discharge_repetition_is_stored() {
        let segment = Segment::new(SegmentKind::Pv1)
            .with_field("AdmitDateTime", json!("202401010800"))
            .with_field("DischargeDateTime", json!(["202401051200", "202401061200"]));
        let mut diagnostics = Vec::new();
        let mut ctx = RowContext::new("PV1", &mut diagnostics);

        let row = pv1_row(&segment, &mut ctx).unwrap().unwrap();
        assert_eq!(row["pv1_admit_datetime"], "2024-01-01 08:00:00");
        assert_eq!(row["pv1_discharge_datetime"], "2024-01-05 12:00:00");
    }

    #[test]
    fn test_single_discharge_value() {
        let segment =
            Segment::new(SegmentKind::Pv1).with_field("DischargeDateTime", json!("20240105"));
        let mut diagnostics = Vec::new();
        let mut ctx = RowContext::new("PV1", &mut diagnostics);

        let row = pv1_row(&segment, &mut ctx).unwrap().unwrap();
        assert!(row["pv1_admit_datetime"].is_null());
        assert_eq!(row["pv1_discharge_datetime"], "2024-01-05 00:00:00");
    }

    #[test]
    fn test_policy_shape() {
        let policy = policy();
        assert_eq!(policy.label(), "PV1");
        assert_eq!(policy.sequence_property(), Some("SetIdPv1"));
        assert!(!policy.accepts(&SegmentKind::Pv2));
    }
}
