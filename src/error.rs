//! Error types for envfill

use thiserror::Error;

/// Result type alias for envfill operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for envfill
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // -------------------------------------------------------------------------
    // Environment Store Errors
    // -------------------------------------------------------------------------
    #[error("Invalid environment variable name '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    #[error("Invalid value for environment variable '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    // -------------------------------------------------------------------------
    // Flag Errors
    // -------------------------------------------------------------------------
    #[error("Invalid value for flag '{flag}' from {source_name}: {reason}")]
    InvalidFlagValue {
        flag: String,
        source_name: String,
        reason: String,
    },
}

impl Error {
    /// Check if this error came from a flag value taken from the environment
    #[must_use]
    pub fn is_flag_error(&self) -> bool {
        matches!(self, Error::InvalidFlagValue { .. })
    }

    /// Check if this error was raised by an environment store mutation
    #[must_use]
    pub fn is_store_error(&self) -> bool {
        matches!(self, Error::InvalidKey { .. } | Error::InvalidValue { .. })
    }
}

// =============================================================================
// Validation Helpers
// =============================================================================

/// Validate an environment variable name before handing it to the platform.
///
/// `std::env::set_var` panics on these inputs instead of returning an error.
pub(crate) fn check_key(key: &str) -> Result<()> {
    let reason = if key.is_empty() {
        "name is empty"
    } else if key.contains('=') {
        "name contains '='"
    } else if key.contains('\0') {
        "name contains a NUL byte"
    } else {
        return Ok(());
    };
    Err(Error::InvalidKey {
        key: key.to_string(),
        reason: reason.to_string(),
    })
}

/// Validate an environment variable value before handing it to the platform.
pub(crate) fn check_value(key: &str, value: &str) -> Result<()> {
    if value.contains('\0') {
        return Err(Error::InvalidValue {
            key: key.to_string(),
            reason: "value contains a NUL byte".to_string(),
        });
    }
    Ok(())
}
