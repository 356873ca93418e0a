//! # hl7-store - HL7v2 segment to relational record mapper
//!
//! hl7-store turns parsed HL7v2 segments into rows of relational tables.
//! Every segment kind has a mapping policy that produces one row for the
//! segment's own table, and the complex fields it declares are broken out
//! into per-datatype tables (CWE, CX, XCN, XAD, XTN, PL).
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Mapping engine, segment policies, message mapping and checksums
//! - [`datatypes`] - Composite datatype casting, preparation and value coercion
//! - [`domain`] - Core domain types (segments, records, identity, errors)
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust
//! use hl7_store::core::mapping::SegmentMapper;
//! use hl7_store::domain::{GroupId, MessageId, Segment, SegmentKind};
//! use serde_json::json;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let segment = Segment::new(SegmentKind::Pid)
//!     .with_field("SetIdPid", json!("1"))
//!     .with_field("DateOfBirth", json!("19800214"));
//!
//! let mut mapper = SegmentMapper::for_segment(&segment)?;
//! mapper
//!     .set_message_id(MessageId::new("MSG-1")?)
//!     .set_group_id(GroupId::top_level())
//!     .set_group_entry(1);
//!
//! let outcome = mapper.prepare()?;
//! let pid = outcome.records.get("PID");
//! assert_eq!(pid[0]["msg_id"], "MSG-1");
//! assert_eq!(pid[0]["pid_dob"], "1980-02-14 00:00:00");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Whole messages
//!
//! [`core::message::MessageMapper`] maps every segment of a
//! [`domain::MessageEnvelope`], numbering repeated segments within their
//! group and skipping kinds without a policy:
//!
//! ```rust
//! use hl7_store::core::message::MessageMapper;
//! use hl7_store::domain::MessageEnvelope;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let envelope: MessageEnvelope = serde_json::from_str(r#"{
//!     "message_id": "MSG-2",
//!     "segments": [
//!         {"segment": "NTE", "fields": {"Comment": "first"}},
//!         {"segment": "NTE", "fields": {"Comment": "second"}}
//!     ]
//! }"#)?;
//!
//! let records = MessageMapper::default().map(&envelope)?;
//! assert_eq!(records.combined().get("NTE").len(), 2);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Error Handling
//!
//! Errors that stop a mapping are [`domain::StoreError`] values. Failures
//! of individual values or rows are contained: they are logged and
//! returned as diagnostics in the mapping outcome, and mapping continues.

pub mod cli;
pub mod config;
pub mod core;
pub mod datatypes;
pub mod domain;
pub mod logging;
