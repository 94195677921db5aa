//! CLI error types.

use ltv_core::{LtvError, ValidationErrors};
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// One or more inputs failed validation.
    #[error("Invalid input:\n{0}")]
    InvalidInput(#[from] ValidationErrors),

    /// An input file could not be read or parsed.
    #[error("Cannot read {path}: {reason}")]
    InputFile {
        /// Path of the offending file.
        path: String,
        /// What went wrong.
        reason: String,
    },

    /// Calculation error.
    #[error("Calculation error: {0}")]
    Calculation(String),

    /// Unknown configuration key.
    #[error("Unknown configuration key: {0}")]
    UnknownConfigKey(String),

    /// Configuration value rejected.
    #[error("Invalid value '{value}' for {key}: {expected}")]
    InvalidConfigValue {
        /// Configuration key being set.
        key: &'static str,
        /// The rejected value.
        value: String,
        /// Accepted values.
        expected: &'static str,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Process exit code for this error.
    ///
    /// Input the user can correct exits with 2, everything else with 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::InvalidInput(_) => 2,
            _ => 1,
        }
    }
}

impl From<LtvError> for CliError {
    fn from(err: LtvError) -> Self {
        match err {
            LtvError::Validation(errors) => CliError::InvalidInput(errors),
            other => CliError::Calculation(other.to_string()),
        }
    }
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
