//! Message envelope
//!
//! The input unit for whole-message mapping: the segments of one parsed HL7v2
//! message, in order, optionally tagged with the repeating group they belong to.

use super::ids::{GroupId, MessageId};
use super::segment::Segment;
use serde::{Deserialize, Serialize};

/// One segment occurrence inside a message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentOccurrence {
    #[serde(flatten)]
    pub segment: Segment,

    /// Repeating group this occurrence belongs to, top level when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<GroupId>,

    /// 1-based position inside the group; numbered automatically when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_entry: Option<u32>,
}

impl SegmentOccurrence {
    /// A top-level occurrence without group information
    pub fn new(segment: Segment) -> Self {
        Self {
            segment,
            group_id: None,
            group_entry: None,
        }
    }

    pub fn in_group(mut self, group_id: GroupId) -> Self {
        self.group_id = Some(group_id);
        self
    }

    pub fn with_group_entry(mut self, entry: u32) -> Self {
        self.group_entry = Some(entry);
        self
    }
}

/// A parsed message ready for mapping
///
/// # Examples
///
/// ```
/// use hl7_store::domain::message::MessageEnvelope;
///
/// let message: MessageEnvelope = serde_json::from_str(r#"{
///     "message_id": "M1",
///     "segments": [
///         {"segment": "PID", "fields": {"SetIdPid": "1"}},
///         {"segment": "IN1", "group_id": "INSURANCE", "fields": {"SetIdInsurance": "1"}}
///     ]
/// }"#).unwrap();
///
/// assert_eq!(message.segments.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageEnvelope {
    /// Message identifier, may be supplied later by the caller
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<MessageId>,

    /// Segments in message order
    #[serde(default)]
    pub segments: Vec<SegmentOccurrence>,
}

impl MessageEnvelope {
    pub fn new(segments: Vec<SegmentOccurrence>) -> Self {
        Self {
            message_id: None,
            segments,
        }
    }

    pub fn with_message_id(mut self, message_id: MessageId) -> Self {
        self.message_id = Some(message_id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::segment::SegmentKind;
    use serde_json::json;

    #[test]
    fn test_occurrence_deserialize_with_group() {
        let occurrence: SegmentOccurrence = serde_json::from_value(json!({
            "segment": "IN1",
            "group_id": "INSURANCE",
            "group_entry": 2,
            "fields": {"SetIdInsurance": "2"}
        }))
        .unwrap();

        assert_eq!(occurrence.segment.kind(), &SegmentKind::In1);
        assert_eq!(occurrence.group_id.unwrap().as_str(), "INSURANCE");
        assert_eq!(occurrence.group_entry, Some(2));
    }

    #[test]
    fn test_envelope_without_message_id() {
        let message: MessageEnvelope =
            serde_json::from_value(json!({"segments": []})).unwrap();
        assert!(message.message_id.is_none());
        assert!(message.segments.is_empty());
    }
}
