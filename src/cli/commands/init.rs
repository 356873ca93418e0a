//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "hl7-store.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing hl7-store configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Validate configuration: hl7-store validate-config");
                println!("  3. Map a message: hl7-store map --input message.json");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# hl7-store Configuration File

[application]
log_level = "info"

[mapping]
default_group_id = "1"
number_group_entries = true
skip_unsupported_segments = true

[output]
pretty = true
combined = false
include_failures = true
include_checksum = true

[logging]
local_enabled = false
local_path = "/var/log/hl7-store"
local_rotation = "daily"
local_max_size_mb = 100
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# hl7-store Configuration File
#
# Every section is optional. Values can reference environment variables
# with ${VAR_NAME}, and HL7STORE_<SECTION>_<KEY> variables override them,
# e.g. HL7STORE_MAPPING_DEFAULT_GROUP_ID=VISIT.

[application]
# Log level: trace, debug, info, warn, error
log_level = "info"

[mapping]
# Group ID stamped on segments that do not belong to a group
default_group_id = "1"

# Number repeated segments of the same kind within a group (1, 2, 3...)
# when the input does not give an entry. When false every entry is 1.
number_group_entries = true

# Skip segments without a mapping (MSH, EVN, OBX...) instead of
# rejecting the whole message
skip_unsupported_segments = true

[output]
# Pretty-print the JSON document
pretty = true

# true: one record set keyed by table for the whole message
# false: records listed per segment together with their identity
combined = false

# Include contained failures, rejected segments and skipped segments
include_failures = true

# Include a SHA-256 checksum of the combined records
include_checksum = true

[logging]
# Write JSON logs to files in addition to the console
local_enabled = false
local_path = "/var/log/hl7-store"

# Rotation: daily, hourly, never, size
# "size" currently rolls daily; local_max_size_mb is reserved for it
local_rotation = "daily"
local_max_size_mb = 100
"#
        .to_string()
    }
}
