//! Query module - the mail search string for one pipeline run

use std::fmt;

/// An immutable mail-provider search query.
///
/// Built once per run from the current time and the static filter criteria
/// (sender address, subject keyword, one-day lookback window). The
/// construction lives in `ledgermail-mail`, next to the provider whose
/// search syntax it speaks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    /// Wrap an already-formatted search string
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The query as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
