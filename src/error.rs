//! Error types for mkgo

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for mkgo operations
pub type Result<T> = std::result::Result<T, MkgoError>;

/// Main error type for mkgo
#[derive(Error, Debug)]
pub enum MkgoError {
    /// Project file errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Child process errors
    #[error("Execution error: {0}")]
    Execution(#[from] ExecutionError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// YAML parsing errors
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Project file discovery, parsing and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to read '{path}': {error}")]
    Read { path: PathBuf, error: String },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidField { field: &'static str, reason: String },
}

/// Errors raised while launching a child process.
///
/// A child that runs and exits non-zero is not an error; its code is
/// handed back as a [`crate::runner::Status`].
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Failed to launch '{program}': {error}")]
    Spawn { program: String, error: io::Error },

    #[error("'{program}' was terminated without an exit code")]
    Terminated { program: String },
}

/// Specialized result type for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Specialized result type for execution operations
pub type ExecutionResult<T> = std::result::Result<T, ExecutionError>;
