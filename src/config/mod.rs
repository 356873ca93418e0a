//! Configuration management for hl7-store.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! hl7-store uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `HL7STORE_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use hl7_store::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("hl7-store.toml")?;
//!
//! println!("Default group: {}", config.mapping.default_group_id);
//! println!("Combined output: {}", config.output.combined);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`MappingConfig`] - Group defaults and unsupported-segment handling
//! - [`OutputConfig`] - Shape of the mapped JSON document
//! - [`LoggingConfig`] - Local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [mapping]
//! default_group_id = "1"
//! number_group_entries = true
//! skip_unsupported_segments = true
//!
//! [output]
//! pretty = true
//! combined = false
//!
//! [logging]
//! local_enabled = true
//! local_path = "${HL7STORE_LOG_DIR}"
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default};
pub use schema::{ApplicationConfig, LoggingConfig, MappingConfig, OutputConfig, StoreConfig};
