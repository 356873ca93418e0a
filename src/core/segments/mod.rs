//! Per-segment mapping policies
//!
//! One [`SegmentMappingPolicy`] per supported segment kind. Each module exposes
//! a `policy()` constructor; [`policy_for`] selects the right one by kind.
//!
//! | Segment | Row table | Sequence property |
//! |---------|-----------|-------------------|
//! | AIS/AIG/AIL/AIP | `AIS`/`AIG`/`AIL`/`AIP` | `SetIdAis`... |
//! | DG1 | `DG1` | `SetIdDg1` |
//! | IN1 | `IN1` | `SetIdInsurance` |
//! | NTE | `NTE` | - |
//! | PD1 | (none) | - |
//! | PID | `PID` | `SetIdPid` |
//! | PR1 | `PR1` | - |
//! | PV1 | `PV1` | `SetIdPv1` |
//! | PV2 | `PV2` | - |
//! | SCH | `SCH` | - |

pub mod dg1;
pub mod in1;
pub mod nte;
pub mod pd1;
pub mod pid;
pub mod pr1;
pub mod pv1;
pub mod pv2;
pub mod sch;
pub mod scheduling;

pub use scheduling::SchedulingResource;

use crate::core::mapping::SegmentMappingPolicy;
use crate::domain::{Record, Result, SegmentKind, StoreError};
use serde_json::Value;

/// Selects the mapping policy for a segment kind
///
/// # Examples
///
/// ```
/// use hl7_store::core::segments::policy_for;
/// use hl7_store::domain::SegmentKind;
///
/// let policy = policy_for(&SegmentKind::Pid).unwrap();
/// assert_eq!(policy.sequence_property(), Some("SetIdPid"));
///
/// assert!(policy_for(&SegmentKind::from("MSH")).is_err());
/// ```
pub fn policy_for(kind: &SegmentKind) -> Result<SegmentMappingPolicy> {
    if let Some(resource) = SchedulingResource::from_kind(kind) {
        return Ok(resource.policy());
    }

    match kind {
        SegmentKind::Dg1 => Ok(dg1::policy()),
        SegmentKind::In1 => Ok(in1::policy()),
        SegmentKind::Nte => Ok(nte::policy()),
        SegmentKind::Pd1 => Ok(pd1::policy()),
        SegmentKind::Pid => Ok(pid::policy()),
        SegmentKind::Pr1 => Ok(pr1::policy()),
        SegmentKind::Pv1 => Ok(pv1::policy()),
        SegmentKind::Pv2 => Ok(pv2::policy()),
        SegmentKind::Sch => Ok(sch::policy()),
        other => Err(StoreError::UnsupportedSegment(other.to_string())),
    }
}

/// True when a policy exists for the kind
pub fn is_supported(kind: &SegmentKind) -> bool {
    !matches!(kind, SegmentKind::Other(_))
}

/// Inserts a nullable text column into a segment row
pub(crate) fn column(row: &mut Record, name: &str, value: Option<String>) {
    row.insert(name.to_string(), value.map_or(Value::Null, Value::String));
}
