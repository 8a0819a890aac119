//! Core Extractor implementation

use crate::config::{ExtractorConfig, FailurePolicy};
use crate::error::ExtractorError;
use crate::parser::parse_response;
use crate::prompt::PromptBuilder;
use crate::schema::RecordSchema;
use crate::types::{ExtractionFailure, ExtractionOutcome};
use ledgermail_domain::{LlmProvider, RawMessage, TransactionRecord};
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// The Extractor converts email bodies into structured transaction records
///
/// One model call is made per message; messages are never batched into a
/// single call. The provider is constructed once at process start and
/// moved in here.
pub struct Extractor<L>
where
    L: LlmProvider,
{
    provider: L,
    schema: RecordSchema,
    config: ExtractorConfig,
}

impl<L> Extractor<L>
where
    L: LlmProvider + Send + Sync,
    L::Error: std::fmt::Display,
{
    /// Create a new Extractor with the transaction schema
    pub fn new(provider: L, config: ExtractorConfig) -> Self {
        Self {
            provider,
            schema: RecordSchema::transaction(),
            config,
        }
    }

    /// The schema this extractor validates responses against
    pub fn schema(&self) -> &RecordSchema {
        &self.schema
    }

    /// Extract one record per message.
    ///
    /// Under `FailurePolicy::Abort` the first malformed response aborts
    /// the whole run; under `FailurePolicy::Skip` the offending message is
    /// logged and recorded in the outcome's failure list. LLM transport
    /// errors and timeouts always propagate regardless of policy.
    pub async fn extract_all(
        &self,
        messages: &[RawMessage],
    ) -> Result<ExtractionOutcome, ExtractorError> {
        info!(
            "Extracting {} message(s), one model call per message",
            messages.len()
        );

        let mut records = Vec::new();
        let mut failures = Vec::new();

        for (idx, message) in messages.iter().enumerate() {
            match self.extract_one(&message.body).await {
                Ok(record) => records.push(record),
                Err(e @ ExtractorError::MalformedOutput(_)) => match self.config.failure_policy {
                    FailurePolicy::Abort => return Err(e),
                    FailurePolicy::Skip => {
                        warn!("Skipping message {}: {}", idx + 1, e);
                        failures.push(ExtractionFailure::new(e.to_string(), &message.body));
                    }
                },
                Err(e) => return Err(e),
            }
        }

        info!(
            "Extraction complete: {} record(s), {} skipped",
            records.len(),
            failures.len()
        );

        Ok(ExtractionOutcome { records, failures })
    }

    /// Extract a record from a single message body
    async fn extract_one(&self, body: &str) -> Result<TransactionRecord, ExtractorError> {
        let prompt = PromptBuilder::new(body).build(&self.schema);

        debug!("Prompt length: {} chars", prompt.len());

        let response = timeout(self.config.request_timeout(), self.provider.generate(&prompt))
            .await
            .map_err(|_| ExtractorError::Timeout)?
            .map_err(|e| ExtractorError::Llm(e.to_string()))?;

        debug!("LLM response length: {} chars", response.len());

        parse_response(&self.schema, &response)
    }
}
