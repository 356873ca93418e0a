//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::StoreConfig;
use crate::domain::errors::StoreError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::OnceLock;

/// Prefix of environment variables that override configuration values
pub const ENV_PREFIX: &str = "HL7STORE_";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into StoreConfig
/// 4. Applies environment variable overrides (HL7STORE_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use hl7_store::config::loader::load_config;
///
/// let config = load_config("hl7-store.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<StoreConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(StoreError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        StoreError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Loads configuration from a TOML file, or defaults when the file is missing
///
/// Environment overrides and validation apply in both cases.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<StoreConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    tracing::debug!(path = %path.display(), "Configuration file not found, using defaults");
    let mut config = StoreConfig::default();
    apply_env_overrides(&mut config)?;
    validate(&config)?;
    Ok(config)
}

/// Parses configuration text, applying substitution, overrides and validation
pub fn parse_config(contents: &str) -> Result<StoreConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: StoreConfig = toml::from_str(&contents)
        .map_err(|e| StoreError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;
    validate(&config)?;

    Ok(config)
}

fn validate(config: &StoreConfig) -> Result<()> {
    config
        .validate()
        .map_err(|e| StoreError::Configuration(format!("Configuration validation failed: {e}")))
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("env var pattern is valid")
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = env_var_pattern();
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&format!("${{{var_name}}}"), &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(StoreError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

fn env_override(key: &str) -> Option<String> {
    std::env::var(format!("{ENV_PREFIX}{key}")).ok()
}

fn env_override_parsed<T: FromStr>(key: &str) -> Result<Option<T>> {
    match env_override(key) {
        None => Ok(None),
        Some(raw) => raw.trim().parse().map(Some).map_err(|_| {
            StoreError::Configuration(format!("Invalid value '{raw}' for {ENV_PREFIX}{key}"))
        }),
    }
}

/// Applies environment variable overrides using HL7STORE_* prefix
///
/// Environment variables follow the pattern: HL7STORE_<SECTION>_<KEY>
/// For example: HL7STORE_APPLICATION_LOG_LEVEL, HL7STORE_OUTPUT_COMBINED
fn apply_env_overrides(config: &mut StoreConfig) -> Result<()> {
    // Application overrides
    if let Some(val) = env_override("APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Mapping overrides
    if let Some(val) = env_override("MAPPING_DEFAULT_GROUP_ID") {
        config.mapping.default_group_id = val;
    }
    if let Some(val) = env_override_parsed("MAPPING_NUMBER_GROUP_ENTRIES")? {
        config.mapping.number_group_entries = val;
    }
    if let Some(val) = env_override_parsed("MAPPING_SKIP_UNSUPPORTED_SEGMENTS")? {
        config.mapping.skip_unsupported_segments = val;
    }

    // Output overrides
    if let Some(val) = env_override_parsed("OUTPUT_PRETTY")? {
        config.output.pretty = val;
    }
    if let Some(val) = env_override_parsed("OUTPUT_COMBINED")? {
        config.output.combined = val;
    }
    if let Some(val) = env_override_parsed("OUTPUT_INCLUDE_FAILURES")? {
        config.output.include_failures = val;
    }
    if let Some(val) = env_override_parsed("OUTPUT_INCLUDE_CHECKSUM")? {
        config.output.include_checksum = val;
    }

    // Logging overrides
    if let Some(val) = env_override_parsed("LOGGING_LOCAL_ENABLED")? {
        config.logging.local_enabled = val;
    }
    if let Some(val) = env_override("LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Some(val) = env_override("LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }
    if let Some(val) = env_override_parsed("LOGGING_LOCAL_MAX_SIZE_MB")? {
        config.logging.local_max_size_mb = val;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("HL7STORE_LOADER_TEST_VAR", "/tmp/logs");
        let input = "local_path = \"${HL7STORE_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "local_path = \"/tmp/logs\"");
        std::env::remove_var("HL7STORE_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("HL7STORE_LOADER_MISSING_VAR");
        let input = "local_path = \"${HL7STORE_LOADER_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("HL7STORE_LOADER_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        std::env::remove_var("HL7STORE_LOADER_COMMENTED_VAR");
        let input = "# local_path = \"${HL7STORE_LOADER_COMMENTED_VAR}\"";
        assert_eq!(substitute_env_vars(input).unwrap(), input);
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(matches!(result, Err(StoreError::Configuration(_))));
    }

    #[test]
    fn test_load_config_or_default_missing_file() {
        let config = load_config_or_default("definitely-not-here.toml").unwrap();
        assert_eq!(config.mapping.default_group_id, "1");
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[mapping]
default_group_id = "ORDER"
number_group_entries = false

[output]
combined = true
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.mapping.default_group_id, "ORDER");
        assert!(!config.mapping.number_group_entries);
        assert!(config.output.combined);
    }

    #[test]
    fn test_parse_config_rejects_invalid_values() {
        let result = parse_config("[logging]\nlocal_rotation = \"weekly\"\n");
        let err = result.unwrap_err();
        assert!(err.to_string().contains("local_rotation"));
    }
}
