//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for hl7-store using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// hl7-store - HL7v2 segment to relational record mapper
#[derive(Parser, Debug)]
#[command(name = "hl7-store")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "hl7-store.toml", env = "HL7STORE_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "HL7STORE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Map the segments of a message into relational records
    Map(commands::map::MapArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_map() {
        let cli = Cli::parse_from(["hl7-store", "map", "--input", "message.json"]);
        assert_eq!(cli.config, "hl7-store.toml");
        match cli.command {
            Commands::Map(args) => {
                assert_eq!(args.input, "message.json");
                assert!(!args.strict);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["hl7-store", "--config", "custom.toml", "validate-config"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["hl7-store", "--log-level", "debug", "map"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_map_flags() {
        let cli = Cli::parse_from([
            "hl7-store",
            "map",
            "--message-id",
            "MSG-9",
            "--combined",
            "--strict",
            "--output",
            "out.json",
        ]);
        match cli.command {
            Commands::Map(args) => {
                assert_eq!(args.message_id.as_deref(), Some("MSG-9"));
                assert!(args.combined);
                assert!(args.strict);
                assert_eq!(args.output.as_deref(), Some("out.json"));
                assert_eq!(args.input, "-");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["hl7-store", "init", "--force"]);
        assert!(matches!(cli.command, Commands::Init(ref args) if args.force));
    }
}
