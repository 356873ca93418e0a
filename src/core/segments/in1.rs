//! IN1 (insurance)

use super::column;
use crate::core::mapping::{FieldDeclarations, RowContext, SegmentMappingPolicy};
use crate::datatypes::coercion::{coerce_complex, validate_date_time, validate_string};
use crate::domain::{Record, Result, Segment, SegmentKind};

pub fn policy() -> SegmentMappingPolicy {
    SegmentMappingPolicy::new(SegmentKind::In1)
        .with_sequence_property("SetIdInsurance")
        .with_declarations(
            FieldDeclarations::new()
                .cwe(["InsurancePlanId"])
                .cx(["InsuranceCompanyId"])
                .xcn(["NameOfInsured"])
                .xad(["InsuranceCompanyAddress"]),
        )
        .with_row(in1_row)
}

fn in1_row(segment: &Segment, _ctx: &mut RowContext<'_>) -> Result<Option<Record>> {
    let mut row = Record::new();
    column(&mut row, "ins_group_number", coerce_complex(segment.get("GroupNumber")));

    for (name, property) in [
        ("ins_plan_effective_date", "PlanEffectiveDate"),
        ("ins_plan_expiration_date", "PlanExpirationDate"),
    ] {
        column(&mut row, name, validate_date_time(segment.get(property)));
    }
    column(&mut row, "ins_plan_type", validate_string(segment.get("PlanType")));
    column(&mut row, "ins_insured_dob", validate_date_time(segment.get("InsuredSDateOfBirth")));
    column(
        &mut row,
        "ins_verification_datetime",
        validate_date_time(segment.get("VerificationDateTime")),
    );

    for (name, property) in [
        ("ins_policy_number", "PolicyNumber"),
        ("ins_coverage_type", "CoverageType"),
        ("ins_billing_status", "BillingStatus"),
    ] {
        column(&mut row, name, validate_string(segment.get(property)));
    }

    Ok(Some(row))
}
