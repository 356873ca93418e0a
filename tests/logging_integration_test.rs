//! Integration tests for logging functionality
//!
//! The global subscriber can only be installed once per process, so a single
//! test installs it and the rest exercise configuration handling.

use hl7_store::config::loader::parse_config;
use hl7_store::config::LoggingConfig;
use hl7_store::core::message::MessageMapper;
use hl7_store::domain::MessageEnvelope;
use hl7_store::logging::init_logging;
use hl7_store::logging::structured::LOG_FILE_NAME;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(!config.local_enabled);
    assert_eq!(config.local_rotation, "daily");
    assert_eq!(config.local_max_size_mb, 100);
}

#[test]
fn test_invalid_log_level_is_rejected() {
    let result = init_logging("verbose", &LoggingConfig::default());
    assert!(result.is_err());
    if let Err(e) = result {
        assert!(e.to_string().contains("Invalid log level"));
    }
}

#[test]
fn test_logging_rotation_types() {
    for rotation in ["daily", "hourly", "never", "size"] {
        let toml = format!(
            "[logging]\nlocal_enabled = true\nlocal_path = \"/tmp/hl7-store\"\n\
             local_rotation = \"{rotation}\"\n"
        );
        let config = parse_config(&toml).unwrap();
        assert_eq!(config.logging.local_rotation, rotation);
    }

    let invalid = "[logging]\nlocal_rotation = \"weekly\"\n";
    assert!(parse_config(invalid).is_err());
}

#[test]
fn test_file_logging_records_mapping_events() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");

    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "never".to_string(),
        local_max_size_mb: 100,
    };

    let guard = init_logging("info", &config).unwrap();
    assert!(guard.has_file_output());
    assert!(log_path.exists());

    let envelope: MessageEnvelope = serde_json::from_str(
        r#"{"message_id": "LOG-1", "segments": [{"segment": "NTE", "fields": {"Comment": "x"}}]}"#,
    )
    .unwrap();
    MessageMapper::default().map(&envelope).unwrap();
    drop(guard);

    let log_file = fs::read_dir(&log_path)
        .unwrap()
        .filter_map(|entry| entry.ok())
        .find(|entry| entry.file_name().to_string_lossy().starts_with(LOG_FILE_NAME))
        .expect("log file created");
    let contents = fs::read_to_string(log_file.path()).unwrap();
    let line = contents
        .lines()
        .find(|line| line.contains("Message mapped"))
        .expect("summary logged");
    let event: serde_json::Value = serde_json::from_str(line).unwrap();
    assert_eq!(event["level"], "INFO");
    assert_eq!(event["fields"]["mapped"], 1);
}
