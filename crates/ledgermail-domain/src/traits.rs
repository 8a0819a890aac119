//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the pipeline and its
//! collaborators. Infrastructure implementations live in other crates.

use crate::{Query, RawMessage, TransactionRecord};
use async_trait::async_trait;

/// Trait for fetching messages from a mail provider
///
/// Implemented by the infrastructure layer (`ledgermail-mail`)
#[async_trait]
pub trait MailSource {
    /// Error type for mail operations
    type Error;

    /// Search the inbox and return matching messages.
    ///
    /// May return an empty list; an empty result means "no work" and is not
    /// an error. No retry, pagination, or deduplication is performed.
    async fn search(&self, query: &Query) -> Result<Vec<RawMessage>, Self::Error>;
}

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (`ledgermail-llm`)
#[async_trait]
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Generate a text completion for the given prompt
    async fn generate(&self, prompt: &str) -> Result<String, Self::Error>;
}

/// Trait for appending extracted records to a tabular store
///
/// Implemented by the infrastructure layer (`ledgermail-sheets`)
#[async_trait]
pub trait RowSink {
    /// Error type for sink operations
    type Error;

    /// Append one row per record after existing rows.
    ///
    /// Not idempotent: repeated runs over overlapping time windows can
    /// append duplicate rows.
    async fn append(&self, rows: &[TransactionRecord]) -> Result<(), Self::Error>;
}
