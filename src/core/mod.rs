//! Core mapping logic for hl7-store.
//!
//! # Modules
//!
//! - [`mapping`] - The segment mapper, mapping policies and diagnostics
//! - [`segments`] - Mapping policies of the supported segment kinds
//! - [`message`] - Whole-message mapping, summaries and output documents
//! - [`verification`] - Checksums over mapped records
//!
//! # Mapping Workflow
//!
//! 1. **Select Policy**: Look up the policy of the segment kind
//! 2. **Identify**: Stamp message ID, sequence ID, group ID and group entry
//! 3. **Build Row**: Produce the segment's own table row
//! 4. **Extract**: Cast and prepare every declared complex field
//! 5. **Report**: Return records with diagnostics for contained failures

pub mod mapping;
pub mod message;
pub mod segments;
pub mod verification;
