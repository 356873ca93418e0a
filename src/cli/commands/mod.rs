//! CLI command implementations
//!
//! Every command returns its process exit code:
//! 0 success, 1 mapped with failures under `--strict`, 2 configuration error,
//! 3 input error, 5 fatal error.

pub mod init;
pub mod map;
pub mod validate;
