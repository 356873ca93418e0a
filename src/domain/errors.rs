//! Domain error types
//!
//! This module defines the error hierarchy for hl7-store. Construction-time and
//! precondition failures surface as [`StoreError`]; failures inside field
//! extraction are carried as [`TypeCastError`] or [`FieldPrepareError`] and are
//! contained by the mapping engine.

use crate::datatypes::FieldCategory;
use thiserror::Error;

/// Main hl7-store error type
///
/// This is the primary error type used throughout the crate.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The segment handed to a policy is not of the kind it maps
    #[error("Invalid segment type: expected {expected}, got {actual}")]
    InvalidSegmentType { expected: String, actual: String },

    /// No mapping policy is registered for the segment kind
    #[error("Unsupported segment: {0}")]
    UnsupportedSegment(String),

    /// Message ID or segment sequence ID missing when preparing records
    #[error("Missing identity: {0}")]
    MissingIdentity(String),

    /// The record set already holds content and no force flag was given
    #[error("Instance records not empty. Either set records before processing or use the force flag")]
    RecordsAlreadySet,

    /// Structured value could not be decomposed
    #[error("Type cast error: {0}")]
    TypeCast(#[from] TypeCastError),

    /// Field preparer could not produce records
    #[error("Field preparation error: {0}")]
    FieldPrepare(#[from] FieldPrepareError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Failure decomposing a raw value into a normalized component
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot cast {found} to {category}: {reason}")]
pub struct TypeCastError {
    /// Target datatype name (CWE, CX, EI, ...)
    pub category: String,

    /// Short description of the offending value
    pub found: String,

    /// Why the value was rejected
    pub reason: String,
}

impl TypeCastError {
    /// Creates a new type cast error
    pub fn new(
        category: impl Into<String>,
        found: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            found: found.into(),
            reason: reason.into(),
        }
    }
}

/// Failure turning a normalized component into storage records
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{category} preparer rejected field {field}: {message}")]
pub struct FieldPrepareError {
    /// Category whose preparer failed
    pub category: FieldCategory,

    /// Source field name
    pub field: String,

    /// Error message
    pub message: String,
}

impl FieldPrepareError {
    /// Creates a new field preparation error
    pub fn new(
        category: FieldCategory,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            field: field.into(),
            message: message.into(),
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for StoreError {
    fn from(err: toml::de::Error) -> Self {
        StoreError::Configuration(format!("TOML parse error: {err}"))
    }
}
