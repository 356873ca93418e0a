//! Segment mapping engine
//!
//! Turns one parsed segment into relationally-shaped records. The engine is
//! generic; everything segment-specific lives in a [`SegmentMappingPolicy`]
//! (see [`crate::core::segments`]).
//!
//! # Flow
//!
//! 1. [`SegmentMapper::for_segment`] picks the policy and runs the type guard
//! 2. The caller sets message-scoped identity (message ID, group ID, group entry)
//! 3. [`SegmentMapper::prepare`] builds the segment row and extracts every
//!    declared field category, in the order CWE, CX, XCN, XAD, XTN, PL
//!
//! Failures inside step 3 never abort the segment: they are logged and
//! returned as [`Diagnostic`]s on the [`MappingOutcome`].

pub mod declarations;
pub mod engine;
mod extract;
pub mod helpers;
pub mod outcome;
pub mod policy;

pub use declarations::FieldDeclarations;
pub use engine::SegmentMapper;
pub use outcome::{Diagnostic, MappingOutcome, Severity, Stage};
pub use policy::{RowBuilder, RowContext, SegmentMappingPolicy};
