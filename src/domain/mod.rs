//! Domain models and types for hl7-store.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`MessageId`], [`GroupId`], [`IdentityContext`])
//! - **Input models** ([`Segment`], [`SegmentKind`], [`MessageEnvelope`])
//! - **Output models** ([`Record`], [`RecordSet`])
//! - **Error types** ([`StoreError`], [`TypeCastError`], [`FieldPrepareError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, StoreError>`]:
//!
//! ```rust
//! use hl7_store::domain::{MessageId, Result, StoreError};
//!
//! fn example() -> Result<MessageId> {
//!     MessageId::new("M1").map_err(StoreError::Validation)
//! }
//! ```

pub mod errors;
pub mod identity;
pub mod ids;
pub mod message;
pub mod record;
pub mod result;
pub mod segment;

// Re-export commonly used types for convenience
pub use errors::{FieldPrepareError, StoreError, TypeCastError};
pub use identity::IdentityContext;
pub use ids::{GroupId, MessageId};
pub use message::{MessageEnvelope, SegmentOccurrence};
pub use record::{Record, RecordSet};
pub use result::Result;
pub use segment::{Property, Segment, SegmentKind};
