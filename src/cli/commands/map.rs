//! Map command implementation
//!
//! Reads a message envelope (JSON), maps every supported segment into
//! relational records and writes the resulting document. Status lines go
//! to stderr so stdout carries only the document.

use crate::config::load_config_or_default;
use crate::core::message::{render, MappingOptions, MessageMapper, MessageRecords, OutputOptions};
use crate::domain::{MessageEnvelope, MessageId, StoreError};
use anyhow::Context;
use clap::Args;
use std::fs;
use std::io::{self, Read};

/// Arguments for the map command
#[derive(Args, Debug)]
pub struct MapArgs {
    /// Message envelope JSON file, `-` reads stdin
    #[arg(short, long, default_value = "-")]
    pub input: String,

    /// Message ID, overrides the one in the envelope
    #[arg(short, long)]
    pub message_id: Option<String>,

    /// Write the document to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Merge all records into one record set keyed by table
    #[arg(long)]
    pub combined: bool,

    /// Exit with code 1 when any segment or value failed to map
    #[arg(long)]
    pub strict: bool,
}

impl MapArgs {
    /// Execute the map command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(input = %self.input, config_path = %config_path, "Mapping message");

        let mut config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ Failed to load configuration file");
                eprintln!("   Error: {e}");
                return Ok(2);
            }
        };
        if self.combined {
            config.output.combined = true;
        }

        let mut envelope = match self.read_envelope() {
            Ok(envelope) => envelope,
            Err(e) => {
                eprintln!("❌ Failed to read message: {}", self.input);
                eprintln!("   Error: {e:#}");
                return Ok(3);
            }
        };

        if let Some(ref id) = self.message_id {
            match MessageId::new(id.as_str()) {
                Ok(id) => envelope.message_id = Some(id),
                Err(e) => {
                    eprintln!("❌ Invalid message ID");
                    eprintln!("   Error: {e}");
                    return Ok(3);
                }
            }
        }

        let options = MappingOptions::try_from(&config.mapping)?;
        let records = match MessageMapper::new(options).map(&envelope) {
            Ok(records) => records,
            Err(e @ (StoreError::MissingIdentity(_) | StoreError::UnsupportedSegment(_))) => {
                eprintln!("❌ Message could not be mapped");
                eprintln!("   Error: {e}");
                return Ok(3);
            }
            Err(e) => return Err(e.into()),
        };

        let document = render(&records, &OutputOptions::from(&config.output))?;
        let text = if config.output.pretty {
            serde_json::to_string_pretty(&document)?
        } else {
            serde_json::to_string(&document)?
        };

        match self.output {
            Some(ref path) => {
                fs::write(path, format!("{text}\n"))
                    .with_context(|| format!("Failed to write output file {path}"))?;
            }
            None => println!("{text}"),
        }

        Self::print_summary(&records, self.output.as_deref());

        if self.strict && !records.summary.is_clean() {
            return Ok(1);
        }
        Ok(0)
    }

    fn read_envelope(&self) -> anyhow::Result<MessageEnvelope> {
        let contents = if self.input == "-" {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            buffer
        } else {
            fs::read_to_string(&self.input)
                .with_context(|| format!("Failed to read input file {}", self.input))?
        };

        serde_json::from_str(&contents).context("Input is not a valid message envelope")
    }

    fn print_summary(records: &MessageRecords, output: Option<&str>) {
        let summary = &records.summary;
        let status = if summary.is_clean() { "✅" } else { "⚠️" };
        eprintln!(
            "{status} Mapped message {}: {} of {} segments, {} records",
            records.message_id,
            summary.mapped_segments,
            summary.total_segments,
            summary.total_records
        );
        if summary.skipped_segments > 0 {
            eprintln!("   Skipped: {}", records.skipped.join(", "));
        }
        if summary.failed_segments > 0 || summary.contained_failures > 0 {
            eprintln!(
                "   Failed segments: {}, contained failures: {}",
                summary.failed_segments, summary.contained_failures
            );
        }
        if let Some(path) = output {
            eprintln!("   Output written to {path}");
        }
    }
}
