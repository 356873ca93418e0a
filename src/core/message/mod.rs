//! Whole-message mapping
//!
//! Maps every supported segment of a [`MessageEnvelope`](crate::domain::MessageEnvelope)
//! through its own segment mapper, numbers group entries, merges the results
//! and summarizes what happened.

pub mod mapper;
pub mod output;
pub mod summary;

pub use mapper::{MappingOptions, MessageMapper, MessageRecords};
pub use output::{render, OutputOptions};
pub use summary::{MappingSummary, SegmentFailure};
