//! PD1 (patient additional demographic)
//!
//! Accepted so that messages carrying PD1 map cleanly, but nothing is stored
//! unless the caller declares fields on the mapper.

use crate::core::mapping::SegmentMappingPolicy;
use crate::domain::SegmentKind;

pub fn policy() -> SegmentMappingPolicy {
    SegmentMappingPolicy::new(SegmentKind::Pd1)
}
