//! Record-set verification
//!
//! Deterministic checksums over prepared records. Two mappings of the same
//! input must produce the same checksum.

pub mod checksum;

pub use checksum::{calculate_checksum, record_set_checksum};
