//! SCH (scheduling activity information)

use super::column;
use crate::core::mapping::helpers::prepare_entity_identifier;
use crate::core::mapping::{FieldDeclarations, RowContext, SegmentMappingPolicy};
use crate::datatypes::coercion::{coerce_complex, validate_date_time};
use crate::domain::{Record, Result, Segment, SegmentKind};
use serde_json::Value;

pub fn policy() -> SegmentMappingPolicy {
    SegmentMappingPolicy::new(SegmentKind::Sch)
        .with_declarations(
            FieldDeclarations::new()
                .cwe([
                    "ScheduleId",
                    "EventReason",
                    "AppointmentReason",
                    "AppointmentType",
                    "FillerStatusCode",
                ])
                .xcn(["PlacerContactPerson", "FillerContactPerson"]),
        )
        .with_row(sch_row)
}

fn sch_row(segment: &Segment, ctx: &mut RowContext<'_>) -> Result<Option<Record>> {
    let mut row = Record::new();
    column(&mut row, "sch_occurrence_number", coerce_complex(segment.get("OccurrenceNumber")));
    for (name, property) in [
        ("sch_placer_appt_id", "PlacerAppointmentId"),
        ("sch_filler_appt_id", "FillerAppointmentId"),
        ("sch_parent_placer_appt_id", "ParentPlacerAppointmentId"),
        ("sch_parent_filler_appt_id", "ParentFillerAppointmentId"),
    ] {
        column(&mut row, name, prepare_entity_identifier(segment.get(property)));
    }

    // Start and end come from the first timing/quantity repetition only
    let timing = segment.property("AppointmentTimingQuantity").first();
    let (start, end) = match timing {
        Some(Value::Object(tq)) => (
            validate_date_time(tq.get("StartDateTime")),
            validate_date_time(tq.get("EndDateTime")),
        ),
        other => {
            let found = other.map_or_else(|| "nothing".to_string(), Value::to_string);
            ctx.warn(format!("invalid AppointmentTimingQuantity: {found}"));
            (None, None)
        }
    };
    column(&mut row, "sch_start_datetime", start);
    column(&mut row, "sch_end_datetime", end);

    Ok(Some(row))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mapping::Severity;
    use serde_json::json;

    fn build(segment: &Segment) -> (Record, usize) {
        let mut diagnostics = Vec::new();
        let mut ctx = RowContext::new("SCH", &mut diagnostics);
        let row = sch_row(segment, &mut ctx).unwrap().unwrap();
        assert!(diagnostics.iter().all(|d| d.severity == Severity::Warning));
        (row, diagnostics.len())
    }

    #[test]
    fn test_timing_quantity_start_and_end() {
        let segment = Segment::new(SegmentKind::Sch)
            .with_field("OccurrenceNumber", json!(2))
            .with_field("PlacerAppointmentId", json!({"EntityIdentifier": "P-100"}))
            .with_field("FillerAppointmentId", json!("F-200^FILLER"))
            .with_field(
                "AppointmentTimingQuantity",
                json!([{"StartDateTime": "202401150930", "EndDateTime": "202401151000"}]),
            );

        let (row, warnings) = build(&segment);
        assert_eq!(warnings, 0);
        assert_eq!(row["sch_occurrence_number"], "2");
        assert_eq!(row["sch_placer_appt_id"], "P-100");
        assert_eq!(row["sch_filler_appt_id"], "F-200");
        assert!(row["sch_parent_placer_appt_id"].is_null());
        assert_eq!(row["sch_start_datetime"], "2024-01-15 09:30:00");
        assert_eq!(row["sch_end_datetime"], "2024-01-15 10:00:00");
    }

    #[test]
    fn test_invalid_end_does_not_drop_start() {
        let segment = Segment::new(SegmentKind::Sch).with_field(
            "AppointmentTimingQuantity",
            json!({"StartDateTime": "20240115", "EndDateTime": "20241345"}),
        );

        let (row, warnings) = build(&segment);
        assert_eq!(warnings, 0);
        assert_eq!(row["sch_start_datetime"], "2024-01-15 00:00:00");
        assert!(row["sch_end_datetime"].is_null());
    }

    #[test]
    fn test_non_structured_timing_warns() {
        let segment = Segment::new(SegmentKind::Sch)
            .with_field("AppointmentTimingQuantity", json!(["20240115"]));

        let (row, warnings) = build(&segment);
        assert_eq!(warnings, 1);
        assert!(row["sch_start_datetime"].is_null());
        assert!(row["sch_end_datetime"].is_null());
    }

    #[test]
    fn test_missing_timing_warns() {
        let (row, warnings) = build(&Segment::new(SegmentKind::Sch));
        assert_eq!(warnings, 1);
        assert_eq!(row.len(), 7);
    }
}
