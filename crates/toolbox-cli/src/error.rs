//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Installation could not continue
    #[error("Setup failed: {0}")]
    Setup(String),

    /// SDK error
    #[error(transparent)]
    Sdk(#[from] toolbox_sdk::SdkError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Interactive prompt failed
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
