//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur during extraction
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// LLM provider error
    #[error("LLM error: {0}")]
    Llm(String),

    /// Model call exceeded the configured timeout
    #[error("Extraction timeout")]
    Timeout,

    /// Model response failed schema validation.
    ///
    /// This is the only error class subject to the failure policy; all
    /// other variants propagate regardless of policy.
    #[error("Malformed model output: {0}")]
    MalformedOutput(String),
}
