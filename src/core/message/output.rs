//! JSON document written for a mapped message

use super::mapper::MessageRecords;
use crate::config::OutputConfig;
use crate::domain::Result;
use serde_json::{json, Map, Value};

/// Which parts of [`MessageRecords`] go into the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputOptions {
    pub combined: bool,
    pub include_failures: bool,
    pub include_checksum: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            combined: false,
            include_failures: true,
            include_checksum: true,
        }
    }
}

impl From<&OutputConfig> for OutputOptions {
    fn from(config: &OutputConfig) -> Self {
        Self {
            combined: config.combined,
            include_failures: config.include_failures,
            include_checksum: config.include_checksum,
        }
    }
}

/// Builds the output document
///
/// Per-segment layout lists every outcome with its identity and records;
/// combined layout holds one record set keyed by table.
///
/// ```json
/// {
///   "message_id": "M1",
///   "summary": { "total_segments": 2, ... },
///   "checksum": "3f1c...",
///   "segments": [ { "segment": "PID", "identity": { ... }, "records": { ... } } ],
///   "failures": [ ... ]
/// }
/// ```
pub fn render(records: &MessageRecords, options: &OutputOptions) -> Result<Value> {
    let mut document = Map::new();
    document.insert("message_id".to_string(), json!(records.message_id.as_str()));
    document.insert("summary".to_string(), serde_json::to_value(&records.summary)?);

    if options.include_checksum {
        document.insert("checksum".to_string(), json!(records.checksum()?));
    }

    if options.combined {
        document.insert("records".to_string(), records.combined().to_value());
    } else {
        let segments = records
            .outcomes
            .iter()
            .map(|outcome| {
                Ok(json!({
                    "segment": outcome.segment,
                    "identity": serde_json::to_value(&outcome.identity)?,
                    "records": outcome.records.to_value(),
                }))
            })
            .collect::<Result<Vec<_>>>()?;
        document.insert("segments".to_string(), Value::Array(segments));
    }

    if options.include_failures {
        let contained = records
            .outcomes
            .iter()
            .flat_map(|outcome| outcome.diagnostics.iter())
            .map(serde_json::to_value)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        document.insert("diagnostics".to_string(), Value::Array(contained));
        document.insert("failures".to_string(), serde_json::to_value(&records.failures)?);
        document.insert("skipped".to_string(), json!(records.skipped));
    }

    Ok(Value::Object(document))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::MessageMapper;
    use crate::domain::{MessageEnvelope, MessageId, Segment, SegmentKind, SegmentOccurrence};
    use serde_json::json;

    fn mapped() -> MessageRecords {
        let envelope = MessageEnvelope::new(vec![
            SegmentOccurrence::new(
                Segment::new(SegmentKind::Pid)
                    .with_field("SetIdPid", json!("1"))
                    .with_field("PatientTelecommunicationInformation", json!(["555-1234", true])),
            ),
            SegmentOccurrence::new(Segment::new(SegmentKind::from("OBX"))),
        ])
        .with_message_id(MessageId::new("M-OUT").unwrap());
        MessageMapper::default().map(&envelope).unwrap()
    }

    #[test]
    fn test_per_segment_document() {
        let document = render(&mapped(), &OutputOptions::default()).unwrap();
        assert_eq!(document["message_id"], "M-OUT");
        assert_eq!(document["checksum"].as_str().unwrap().len(), 64);
        assert_eq!(document["segments"][0]["segment"], "PID");
        assert_eq!(document["segments"][0]["identity"]["sid"], "1");
        assert_eq!(document["diagnostics"].as_array().unwrap().len(), 1);
        assert_eq!(document["skipped"], json!(["OBX"]));
        assert!(document.get("records").is_none());
    }

    #[test]
    fn test_combined_document_without_extras() {
        let options = OutputOptions {
            combined: true,
            include_failures: false,
            include_checksum: false,
        };
        let document = render(&mapped(), &options).unwrap();
        assert_eq!(document["records"]["XTN"][0]["xtn_telephone_number"], "555-1234");
        assert!(document.get("checksum").is_none());
        assert!(document.get("diagnostics").is_none());
        assert!(document.get("segments").is_none());
    }
}
