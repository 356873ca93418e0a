//! Configuration schema types
//!
//! This module defines the configuration structure for hl7-store.

use crate::domain::GroupId;
use serde::{Deserialize, Serialize};

/// Main hl7-store configuration
///
/// This is the root configuration structure that maps to the TOML file.
/// Every section is optional; a missing section takes its defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Segment and message mapping behavior
    #[serde(default)]
    pub mapping: MappingConfig,

    /// Shape of the JSON document written by `map`
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StoreConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.mapping.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Mapping configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingConfig {
    /// Group ID for segments that do not name one
    #[serde(default = "default_group_id")]
    pub default_group_id: String,

    /// Number repeated segments within a group (1, 2, ...) when the input
    /// leaves `group_entry` out; otherwise every such segment gets entry 1
    #[serde(default = "default_true")]
    pub number_group_entries: bool,

    /// Skip segment kinds without a mapping policy instead of failing
    #[serde(default = "default_true")]
    pub skip_unsupported_segments: bool,
}

impl MappingConfig {
    fn validate(&self) -> Result<(), String> {
        GroupId::new(self.default_group_id.clone())
            .map(|_| ())
            .map_err(|e| format!("mapping.default_group_id is invalid: {e}"))
    }
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            default_group_id: default_group_id(),
            number_group_entries: true,
            skip_unsupported_segments: true,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Pretty-print the JSON document
    #[serde(default = "default_true")]
    pub pretty: bool,

    /// Merge all segments into one table-keyed record set
    #[serde(default)]
    pub combined: bool,

    /// Include contained failures and warnings
    #[serde(default = "default_true")]
    pub include_failures: bool,

    /// Include a SHA-256 checksum of the records
    #[serde(default = "default_true")]
    pub include_checksum: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            combined: false,
            include_failures: true,
            include_checksum: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log file path
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,

    /// Maximum log file size in MB
    ///
    /// Reserved for `local_rotation = "size"`. The rolling appender has no
    /// size trigger, so size rotation currently rolls daily and this limit is
    /// only validated and reported at startup.
    #[serde(default = "default_local_max_size_mb")]
    pub local_max_size_mb: usize,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never", "size"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_max_size_mb == 0 {
            return Err("logging.local_max_size_mb must be > 0".to_string());
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err(
                "logging.local_path cannot be empty when local logging is enabled".to_string(),
            );
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
            local_max_size_mb: default_local_max_size_mb(),
        }
    }
}

// Default value functions

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_group_id() -> String {
    GroupId::TOP_LEVEL.to_string()
}

fn default_local_path() -> String {
    "/var/log/hl7-store".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

fn default_local_max_size_mb() -> usize {
    100
}
