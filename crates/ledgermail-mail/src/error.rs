//! Error types for the mail adapter

use thiserror::Error;

/// Errors from the mail provider.
///
/// Both classes mean the source is unavailable for this run; neither is
/// handled locally, they propagate to the top level.
#[derive(Error, Debug)]
pub enum MailError {
    /// Credential files could not be read or the OAuth flow failed
    #[error("Mail authentication error: {0}")]
    Auth(String),

    /// The mail API rejected or failed a request
    #[error("Mail API error: {0}")]
    Api(String),
}
