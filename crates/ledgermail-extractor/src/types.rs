//! Result types for extraction

use ledgermail_domain::TransactionRecord;

/// Result of running the extractor over a batch of messages
#[derive(Debug, Clone)]
pub struct ExtractionOutcome {
    /// One record per successfully parsed message, in input order
    pub records: Vec<TransactionRecord>,

    /// Messages skipped under `FailurePolicy::Skip`; always empty under
    /// `FailurePolicy::Abort`
    pub failures: Vec<ExtractionFailure>,
}

/// A message whose model response failed schema validation
#[derive(Debug, Clone)]
pub struct ExtractionFailure {
    /// Why the response was rejected
    pub reason: String,

    /// The start of the offending message body, for log correlation
    pub body_excerpt: String,
}

impl ExtractionFailure {
    const EXCERPT_LEN: usize = 80;

    /// Build a failure from the rejection reason and the message body
    pub fn new(reason: impl Into<String>, body: &str) -> Self {
        let body_excerpt = body.chars().take(Self::EXCERPT_LEN).collect();
        Self {
            reason: reason.into(),
            body_excerpt,
        }
    }
}
