//! Message mapper - maps every segment of one message
//!
//! Each supported segment occurrence goes through its own fresh
//! [`SegmentMapper`]; the outcomes are kept in message order.

use super::summary::{MappingSummary, SegmentFailure};
use crate::config::MappingConfig;
use crate::core::mapping::{MappingOutcome, SegmentMapper};
use crate::core::segments;
use crate::core::verification::record_set_checksum;
use crate::datatypes::DatatypeRegistry;
use crate::domain::{GroupId, MessageEnvelope, MessageId, RecordSet, Result, StoreError};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

/// Message-level mapping behavior
#[derive(Debug, Clone)]
pub struct MappingOptions {
    /// Group for occurrences that do not name one
    pub default_group_id: GroupId,

    /// Number repeated occurrences within a group when no entry is given
    pub number_group_entries: bool,

    /// Skip kinds without a policy instead of failing the message
    pub skip_unsupported_segments: bool,
}

impl Default for MappingOptions {
    fn default() -> Self {
        Self {
            default_group_id: GroupId::top_level(),
            number_group_entries: true,
            skip_unsupported_segments: true,
        }
    }
}

impl TryFrom<&MappingConfig> for MappingOptions {
    type Error = StoreError;

    fn try_from(config: &MappingConfig) -> Result<Self> {
        let default_group_id = GroupId::new(config.default_group_id.clone())
            .map_err(StoreError::Configuration)?;
        Ok(Self {
            default_group_id,
            number_group_entries: config.number_group_entries,
            skip_unsupported_segments: config.skip_unsupported_segments,
        })
    }
}

/// Everything produced for one message
#[derive(Debug, Clone, Serialize)]
pub struct MessageRecords {
    pub message_id: MessageId,

    /// One outcome per mapped segment, in message order
    pub outcomes: Vec<MappingOutcome>,

    /// Occurrences that failed before producing records
    pub failures: Vec<SegmentFailure>,

    /// Tags of skipped unsupported occurrences, in message order
    pub skipped: Vec<String>,

    pub summary: MappingSummary,
}

impl MessageRecords {
    /// All outcomes merged per table, segment order first, then row order
    pub fn combined(&self) -> RecordSet {
        let mut combined = RecordSet::new();
        for outcome in &self.outcomes {
            combined.merge(outcome.records.clone());
        }
        combined
    }

    /// Checksum of the combined records
    pub fn checksum(&self) -> Result<String> {
        record_set_checksum(&self.combined())
    }
}

/// Maps whole messages
///
/// # Examples
///
/// ```
/// use hl7_store::core::message::MessageMapper;
/// use hl7_store::domain::MessageEnvelope;
///
/// let envelope: MessageEnvelope = serde_json::from_str(r#"{
///     "message_id": "M1",
///     "segments": [
///         {"segment": "MSH", "fields": {}},
///         {"segment": "PID", "fields": {"SetIdPid": "1", "DateOfBirth": "19800214"}}
///     ]
/// }"#).unwrap();
///
/// let records = MessageMapper::default().map(&envelope).unwrap();
/// assert_eq!(records.summary.mapped_segments, 1);
/// assert_eq!(records.skipped, vec!["MSH".to_string()]);
/// assert_eq!(records.combined().get("PID")[0]["pid_dob"], "1980-02-14 00:00:00");
/// ```
#[derive(Debug, Clone)]
pub struct MessageMapper {
    options: MappingOptions,
    registry: Arc<DatatypeRegistry>,
}

impl Default for MessageMapper {
    fn default() -> Self {
        Self::new(MappingOptions::default())
    }
}

impl MessageMapper {
    pub fn new(options: MappingOptions) -> Self {
        Self {
            options,
            registry: DatatypeRegistry::standard(),
        }
    }

    /// Replaces the casters and preparers handed to every segment mapper
    pub fn with_registry(mut self, registry: Arc<DatatypeRegistry>) -> Self {
        self.registry = registry;
        self
    }

    pub fn options(&self) -> &MappingOptions {
        &self.options
    }

    /// Maps every segment of the message
    ///
    /// # Errors
    ///
    /// - [`StoreError::MissingIdentity`] when the envelope carries no message ID
    /// - [`StoreError::UnsupportedSegment`] for a kind without a policy when
    ///   skipping is disabled
    ///
    /// Per-segment construction and identity failures do not abort the
    /// message; they are reported in [`MessageRecords::failures`].
    pub fn map(&self, envelope: &MessageEnvelope) -> Result<MessageRecords> {
        let start_time = Instant::now();
        let message_id = envelope.message_id.clone().ok_or_else(|| {
            StoreError::MissingIdentity(
                "message ID is required for mapping a message, \
                 supply it in the input or on the command line"
                    .to_string(),
            )
        })?;

        tracing::debug!(
            message_id = %message_id,
            segments = envelope.segments.len(),
            "Mapping message"
        );

        let mut summary = MappingSummary::new();
        summary.total_segments = envelope.segments.len();
        let mut outcomes = Vec::new();
        let mut failures = Vec::new();
        let mut skipped = Vec::new();
        let mut entries: HashMap<(GroupId, String), u32> = HashMap::new();

        for (index, occurrence) in envelope.segments.iter().enumerate() {
            let kind = occurrence.segment.kind();
            if !segments::is_supported(kind) {
                if !self.options.skip_unsupported_segments {
                    return Err(StoreError::UnsupportedSegment(kind.to_string()));
                }
                tracing::debug!(index, segment = %kind, "Skipping unsupported segment");
                skipped.push(kind.to_string());
                continue;
            }

            let group_id = occurrence
                .group_id
                .clone()
                .unwrap_or_else(|| self.options.default_group_id.clone());

            let counter = entries
                .entry((group_id.clone(), kind.to_string()))
                .or_insert(0);
            *counter += 1;
            let group_entry = match occurrence.group_entry {
                Some(entry) => entry,
                None if self.options.number_group_entries => *counter,
                None => 1,
            };

            let prepared = SegmentMapper::for_segment(&occurrence.segment).and_then(|mapper| {
                let mut mapper = mapper.with_registry(Arc::clone(&self.registry));
                mapper
                    .set_message_id(message_id.clone())
                    .set_group_id(group_id)
                    .set_group_entry(group_entry);
                mapper.prepare()
            });

            match prepared {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => {
                    let context = format!("segment {index} ({kind})");
                    crate::log_error_with_context!(&e, context.as_str());
                    failures.push(SegmentFailure::new(index, kind.to_string(), e.to_string()));
                }
            }
        }

        summary.mapped_segments = outcomes.len();
        summary.skipped_segments = skipped.len();
        summary.failed_segments = failures.len();
        summary.total_records = outcomes.iter().map(|o| o.records.len()).sum();
        summary.contained_failures = outcomes.iter().map(|o| o.failures().count()).sum();
        summary.warnings = outcomes.iter().map(|o| o.warnings().count()).sum();
        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();

        Ok(MessageRecords {
            message_id,
            outcomes,
            failures,
            skipped,
            summary,
        })
    }
}
