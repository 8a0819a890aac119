//! Error types for the spreadsheet adapter

use thiserror::Error;

/// Errors from the spreadsheet provider
#[derive(Error, Debug)]
pub enum SheetError {
    /// Service-account key could not be read or authentication failed
    #[error("Sheet authentication error: {0}")]
    Auth(String),

    /// The Sheets API rejected or failed the append
    #[error("Sheet upload error: {0}")]
    Upload(String),
}
