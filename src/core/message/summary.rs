//! Message mapping summary and reporting
//!
//! This module defines structures for tracking and reporting the result of
//! mapping one message.

use serde::Serialize;
use std::time::Duration;

/// A segment occurrence that could not be mapped at all
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegmentFailure {
    /// Position of the segment in the message, 0-based
    pub index: usize,

    /// Segment tag
    pub segment: String,

    /// Error message
    pub message: String,
}

impl SegmentFailure {
    pub fn new(index: usize, segment: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            index,
            segment: segment.into(),
            message: message.into(),
        }
    }
}

/// Summary of one message mapping
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MappingSummary {
    /// Segments in the message
    pub total_segments: usize,

    /// Segments that produced an outcome
    pub mapped_segments: usize,

    /// Segments without a mapping policy
    pub skipped_segments: usize,

    /// Segments rejected before any record was produced
    pub failed_segments: usize,

    /// Records across all mapped segments
    pub total_records: usize,

    /// Values or rows dropped during mapping
    pub contained_failures: usize,

    /// Non-fatal data problems
    pub warnings: usize,

    /// Wall-clock mapping time
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
}

impl MappingSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// True when every segment mapped and nothing was dropped
    pub fn is_clean(&self) -> bool {
        self.failed_segments == 0 && self.contained_failures == 0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            total_segments = self.total_segments,
            mapped = self.mapped_segments,
            skipped = self.skipped_segments,
            failed = self.failed_segments,
            records = self.total_records,
            contained_failures = self.contained_failures,
            warnings = self.warnings,
            duration_ms = self.duration.as_millis() as u64,
            "Message mapped"
        );

        if !self.is_clean() {
            tracing::warn!(
                failed = self.failed_segments,
                contained_failures = self.contained_failures,
                "Message mapped with failures"
            );
        }
    }
}

fn serialize_millis<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_u64(duration.as_millis() as u64)
}
