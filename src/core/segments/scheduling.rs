//! Scheduling resource segments (AIS, AIG, AIL, AIP)
//!
//! The four appointment-information segments share one row layout and
//! differ only in their sequence property and field declarations.

use super::column;
use crate::core::mapping::helpers::prepare_units;
use crate::core::mapping::{FieldDeclarations, RowContext, SegmentMappingPolicy};
use crate::datatypes::coercion::{coerce_complex, validate_date_time};
use crate::domain::{Record, Result, Segment, SegmentKind};

/// One of the appointment-information segment kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulingResource {
    /// AIS: service
    Service,
    /// AIG: general resource
    General,
    /// AIL: location
    Location,
    /// AIP: personnel
    Personnel,
}

impl SchedulingResource {
    pub fn from_kind(kind: &SegmentKind) -> Option<Self> {
        match kind {
            SegmentKind::Ais => Some(Self::Service),
            SegmentKind::Aig => Some(Self::General),
            SegmentKind::Ail => Some(Self::Location),
            SegmentKind::Aip => Some(Self::Personnel),
            _ => None,
        }
    }

    pub fn kind(self) -> SegmentKind {
        match self {
            Self::Service => SegmentKind::Ais,
            Self::General => SegmentKind::Aig,
            Self::Location => SegmentKind::Ail,
            Self::Personnel => SegmentKind::Aip,
        }
    }

    pub fn sequence_property(self) -> &'static str {
        match self {
            Self::Service => "SetIdAis",
            Self::General => "SetIdAig",
            Self::Location => "SetIdAil",
            Self::Personnel => "SetIdAip",
        }
    }

    /// Per-kind declarations in place from construction
    pub fn resource_declarations(self) -> FieldDeclarations {
        match self {
            Self::Service => FieldDeclarations::new(),
            Self::General => {
                FieldDeclarations::new().cwe(["ResourceId", "ResourceType", "ResourceGroup"])
            }
            Self::Location => FieldDeclarations::new()
                .cwe(["LocationType", "LocationGroup"])
                .pl(["LocationResourceId"]),
            Self::Personnel => FieldDeclarations::new()
                .cwe(["ResourceType", "ResourceGroup"])
                .xcn(["PersonnelResourceId"]),
        }
    }

    /// Declarations shared by the whole family, added while preparing
    pub fn status_declarations() -> FieldDeclarations {
        FieldDeclarations::new().cwe(["FillerStatusCode"])
    }

    /// Every field the kind declares, in extraction order without caller fields
    pub fn declarations(self) -> FieldDeclarations {
        self.resource_declarations().merged(&Self::status_declarations())
    }

    pub fn policy(self) -> SegmentMappingPolicy {
        SegmentMappingPolicy::new(self.kind())
            .with_sequence_property(self.sequence_property())
            .with_construction_declarations(self.resource_declarations())
            .with_declarations(Self::status_declarations())
            .with_row(scheduling_row)
    }
}

fn scheduling_row(segment: &Segment, _ctx: &mut RowContext<'_>) -> Result<Option<Record>> {
    let mut row = Record::new();
    column(
        &mut row,
        "ai_segment_action_code",
        coerce_complex(segment.get("SegmentActionCode")),
    );
    column(&mut row, "ai_start_date_time", validate_date_time(segment.get("StartDateTime")));
    column(
        &mut row,
        "ai_start_date_time_offset",
        coerce_complex(segment.get("StartDateTimeOffset")),
    );
    column(
        &mut row,
        "ai_start_date_time_offset_units",
        prepare_units(segment.get("StartDateTimeOffsetUnits")),
    );
    column(&mut row, "ai_duration", coerce_complex(segment.get("Duration")));
    column(&mut row, "ai_duration_units", prepare_units(segment.get("DurationUnits")));
    Ok(Some(row))
}
