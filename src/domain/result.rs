//! Result type alias for hl7-store
//!
//! This module provides a convenient Result type alias that uses StoreError
//! as the error type.

use super::errors::StoreError;

/// Result type alias for hl7-store operations
///
/// # Examples
///
/// ```
/// use hl7_store::domain::result::Result;
/// use hl7_store::domain::errors::StoreError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(StoreError::MissingIdentity("message id".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, StoreError>;
