//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use ledgermail_extractor::ExtractorConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Mail filter criteria and credential paths
    #[serde(default)]
    pub mail: MailSettings,

    /// Spreadsheet target and credential path
    #[serde(default)]
    pub sheet: SheetSettings,

    /// Model name and API endpoint
    #[serde(default)]
    pub model: ModelSettings,

    /// Extraction settings (timeout, failure policy)
    #[serde(default)]
    pub extractor: ExtractorConfig,
}

/// Mail source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailSettings {
    /// Sender address the transaction alerts come from
    pub sender: String,

    /// Keyword the alert subject must contain
    pub subject_keyword: String,

    /// OAuth client-secret JSON file
    pub client_secret_file: PathBuf,

    /// On-disk OAuth token cache
    pub token_cache_file: PathBuf,
}

/// Spreadsheet sink settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetSettings {
    /// Service-account key JSON file
    pub service_account_key_file: PathBuf,

    /// Target spreadsheet ID
    pub spreadsheet_id: String,

    /// A1 range the append searches from (names the target sheet)
    pub range: String,
}

/// Model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSettings {
    /// Model identifier
    pub name: String,

    /// API base URL
    pub endpoint: String,
}

impl Config {
    /// Get the configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".ledgermail").join("config.toml"))
    }

    /// Load configuration from the default path or create default.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;

        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to the default path.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Save configuration to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Validate the configuration before a run.
    pub fn validate(&self) -> Result<()> {
        if self.mail.sender.is_empty() {
            return Err(CliError::Config("mail.sender must be set".into()));
        }
        if self.mail.subject_keyword.is_empty() {
            return Err(CliError::Config("mail.subject_keyword must be set".into()));
        }
        if self.sheet.spreadsheet_id.is_empty() {
            return Err(CliError::Config("sheet.spreadsheet_id must be set".into()));
        }
        if self.sheet.range.is_empty() {
            return Err(CliError::Config("sheet.range must be set".into()));
        }
        if self.model.name.is_empty() {
            return Err(CliError::Config("model.name must be set".into()));
        }
        self.extractor.validate().map_err(CliError::Config)?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mail: MailSettings::default(),
            sheet: SheetSettings::default(),
            model: ModelSettings::default(),
            extractor: ExtractorConfig::default(),
        }
    }
}

impl Default for MailSettings {
    fn default() -> Self {
        Self {
            sender: "no-reply-ncbcardalerts@jncb.com".to_string(),
            subject_keyword: "TRANSACTION APPROVED".to_string(),
            client_secret_file: PathBuf::from("CREDENTIALS.json"),
            token_cache_file: PathBuf::from("TOKEN.json"),
        }
    }
}

impl Default for SheetSettings {
    fn default() -> Self {
        Self {
            service_account_key_file: PathBuf::from("GSHEETS.json"),
            spreadsheet_id: String::new(),
            range: "Sheet1!A1".to_string(),
        }
    }
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            name: ledgermail_llm::openrouter::DEFAULT_MODEL.to_string(),
            endpoint: ledgermail_llm::openrouter::DEFAULT_ENDPOINT.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgermail_extractor::FailurePolicy;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.mail.sender, "no-reply-ncbcardalerts@jncb.com");
        assert_eq!(config.mail.subject_keyword, "TRANSACTION APPROVED");
        assert_eq!(config.extractor.failure_policy, FailurePolicy::Abort);
    }

    #[test]
    fn test_default_config_fails_validation_without_spreadsheet_id() {
        let config = Config::default();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("spreadsheet_id"));
    }

    #[test]
    fn test_validation_passes_with_spreadsheet_id() {
        let mut config = Config::default();
        config.sheet.spreadsheet_id = "1abc".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.sheet.spreadsheet_id = "1abc".to_string();
        config.extractor.failure_policy = FailurePolicy::Skip;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.sheet.spreadsheet_id, "1abc");
        assert_eq!(loaded.extractor.failure_policy, FailurePolicy::Skip);
        assert_eq!(loaded.mail.sender, config.mail.sender);
    }

    #[test]
    fn test_partial_file_takes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[sheet]\nservice_account_key_file = \"key.json\"\nspreadsheet_id = \"1abc\"\nrange = \"Sheet1!A1\"\n").unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.sheet.spreadsheet_id, "1abc");
        assert_eq!(loaded.mail.subject_keyword, "TRANSACTION APPROVED");
        assert_eq!(loaded.extractor.request_timeout_secs, 120);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "not valid toml [").unwrap();

        assert!(Config::load_from(&path).is_err());
    }
}
