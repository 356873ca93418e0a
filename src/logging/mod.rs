//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output on stderr
//! - JSON-formatted file logs with rotation
//! - Configurable log levels, overridable through `RUST_LOG`
//!
//! # Example
//!
//! ```no_run
//! use hl7_store::logging::init_logging;
//! use hl7_store::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log the completion of one segment mapping
///
/// # Example
///
/// ```no_run
/// use hl7_store::log_segment_mapped;
///
/// log_segment_mapped!("PID", 12, 0);
/// ```
#[macro_export]
macro_rules! log_segment_mapped {
    ($segment:expr, $records:expr, $failures:expr) => {
        tracing::debug!(
            segment = %$segment,
            records = $records,
            failures = $failures,
            "Segment mapped"
        );
    };
}

/// Log a failure that was contained during mapping
///
/// # Example
///
/// ```no_run
/// use hl7_store::log_contained_failure;
/// use hl7_store::core::mapping::{Diagnostic, Severity, Stage};
///
/// let diagnostic = Diagnostic::new(Severity::Error, Stage::TypeCast, "PID", "bad value");
/// log_contained_failure!(&diagnostic);
/// ```
#[macro_export]
macro_rules! log_contained_failure {
    ($diagnostic:expr) => {
        tracing::warn!(
            segment = %$diagnostic.segment,
            stage = %$diagnostic.stage,
            field = ?$diagnostic.field,
            entry = ?$diagnostic.entry,
            message = %$diagnostic.message,
            "Contained mapping failure"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use hl7_store::log_error_with_context;
/// use hl7_store::domain::StoreError;
///
/// let error = StoreError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
