//! Ledgermail Mail Layer
//!
//! The `MailSource` implementation backed by the Gmail API, and the search
//! query builder that speaks Gmail's search syntax.
//!
//! The query is a pure function of the filter criteria and the current
//! time; the Gmail adapter performs no retry, pagination, or deduplication
//! beyond the query's one-day lookback window.

#![warn(missing_docs)]

mod error;
mod gmail;
mod query;

pub use error::MailError;
pub use gmail::GmailSource;
pub use query::{build_query, SearchCriteria};
