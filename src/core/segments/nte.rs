//! NTE (notes and comments)

use super::column;
use crate::core::mapping::{FieldDeclarations, RowContext, SegmentMappingPolicy};
use crate::datatypes::coercion::{coerce_complex, validate_date_time};
use crate::domain::{Record, Result, Segment, SegmentKind};

pub fn policy() -> SegmentMappingPolicy {
    SegmentMappingPolicy::new(SegmentKind::Nte)
        .with_declarations(
            FieldDeclarations::new()
                .cwe(["CommentType"])
                .xcn(["EnteredBy"]),
        )
        .with_row(nte_row)
}

fn nte_row(segment: &Segment, _ctx: &mut RowContext<'_>) -> Result<Option<Record>> {
    let mut row = Record::new();
    column(&mut row, "note_source_of_comment", coerce_complex(segment.get("SourceOfComment")));
    column(&mut row, "note_comment", coerce_complex(segment.get("Comment")));
    for (name, property) in [
        ("note_entered_date_time", "EnteredDateTime"),
        ("note_effective_date_time", "EffectiveStartDate"),
        ("note_expiration_date_time", "ExpirationDate"),
    ] {
        column(&mut row, name, validate_date_time(segment.get(property)));
    }
    Ok(Some(row))
}
