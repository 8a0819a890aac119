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

    /// Mail source error
    #[error("Mail source error: {0}")]
    Mail(String),

    /// Extraction error
    #[error("Extraction error: {0}")]
    Extraction(#[from] ledgermail_extractor::ExtractorError),

    /// Spreadsheet upload error
    #[error("Upload error: {0}")]
    Upload(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}
