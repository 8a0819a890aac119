//! Configuration for the Extractor

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What to do when a model response fails schema validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Propagate the first malformed response and abort the run
    /// (the baseline behavior)
    Abort,
    /// Log and record the failure, continue with the remaining messages
    Skip,
}

impl Default for FailurePolicy {
    fn default() -> Self {
        FailurePolicy::Abort
    }
}

/// Configuration for the Extractor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Maximum time for a single model call (seconds)
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Policy for malformed model output
    #[serde(default)]
    pub failure_policy: FailurePolicy,
}

impl ExtractorConfig {
    /// Get the request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_timeout_secs(),
            failure_policy: FailurePolicy::default(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    120
}
