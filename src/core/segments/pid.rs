//! PID (patient identification)

use super::column;
use crate::core::mapping::{FieldDeclarations, RowContext, SegmentMappingPolicy};
use crate::datatypes::coercion::validate_date_time;
use crate::domain::{Record, Result, Segment, SegmentKind};

pub fn policy() -> SegmentMappingPolicy {
    SegmentMappingPolicy::new(SegmentKind::Pid)
        .with_sequence_property("SetIdPid")
        .with_declarations(
            FieldDeclarations::new()
                .cwe([
                    "AdministrativeSex",
                    "Race",
                    "PrimaryLanguage",
                    "MaritalStatus",
                    "Religion",
                    "EthnicGroup",
                ])
                .cx([
                    "PatientId",
                    "PatientIdExternalId",
                    "PatientIdentifierList",
                    "AlternatePatientId",
                    "PatientAccountNumber",
                ])
                .xcn(["PatientName", "MotherSMaidenName"])
                .xad(["PatientAddress"])
                .xtn(["PatientTelecommunicationInformation"]),
        )
        .with_row(pid_row)
}

fn pid_row(segment: &Segment, _ctx: &mut RowContext<'_>) -> Result<Option<Record>> {
    let mut row = Record::new();
    column(&mut row, "pid_dob", validate_date_time(segment.get("DateOfBirth")));
    Ok(Some(row))
}
