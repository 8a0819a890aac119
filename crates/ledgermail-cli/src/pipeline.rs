//! Pipeline orchestration: fetch, extract, upload.

use crate::error::{CliError, Result};
use async_trait::async_trait;
use ledgermail_domain::{LlmProvider, MailSource, Query, RowSink, TransactionRecord};
use ledgermail_extractor::Extractor;
use std::fmt::Display;
use tracing::info;

/// What one pipeline run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Messages returned by the mail search
    pub fetched: usize,

    /// Records successfully extracted
    pub extracted: usize,

    /// Messages skipped under the skip policy
    pub skipped: usize,

    /// Rows delivered to the sink
    pub appended: usize,
}

/// Run the pipeline once: search mail, extract records, append rows.
///
/// An empty search result short-circuits the run: no model calls, no sink
/// call. The sink is also not invoked when extraction yields zero records
/// (possible when every message was skipped).
pub async fn run<M, L, S>(
    source: &M,
    extractor: &Extractor<L>,
    sink: &S,
    query: &Query,
) -> Result<RunSummary>
where
    M: MailSource + Sync,
    M::Error: Display,
    L: LlmProvider + Send + Sync,
    L::Error: Display,
    S: RowSink + Sync,
    S::Error: Display,
{
    let messages = source
        .search(query)
        .await
        .map_err(|e| CliError::Mail(e.to_string()))?;

    if messages.is_empty() {
        info!("No new emails to process");
        return Ok(RunSummary::default());
    }

    let outcome = extractor.extract_all(&messages).await?;

    let appended = if outcome.records.is_empty() {
        info!("No records to upload");
        0
    } else {
        sink.append(&outcome.records)
            .await
            .map_err(|e| CliError::Upload(e.to_string()))?;
        outcome.records.len()
    };

    Ok(RunSummary {
        fetched: messages.len(),
        extracted: outcome.records.len(),
        skipped: outcome.failures.len(),
        appended,
    })
}

/// Sink for `--dry-run`: prints rows to stdout instead of uploading.
pub struct DryRunSink;

#[async_trait]
impl RowSink for DryRunSink {
    type Error = std::convert::Infallible;

    async fn append(
        &self,
        rows: &[TransactionRecord],
    ) -> std::result::Result<(), Self::Error> {
        for record in rows {
            println!("{}", record.to_row().join("\t"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgermail_domain::RawMessage;
    use ledgermail_extractor::{ExtractorConfig, FailurePolicy};
    use ledgermail_llm::MockProvider;
    use std::sync::{Arc, Mutex};

    const RESPONSE: &str = r#"{
        "date": "2024-05-01",
        "time": "14:32",
        "amount": 2500.0,
        "merchant": "ABC FOODS",
        "status": "approved",
        "type": "debit"
    }"#;

    struct StubSource {
        messages: Vec<RawMessage>,
    }

    #[async_trait]
    impl MailSource for StubSource {
        type Error = std::convert::Infallible;

        async fn search(
            &self,
            _query: &Query,
        ) -> std::result::Result<Vec<RawMessage>, Self::Error> {
            Ok(self.messages.clone())
        }
    }

    #[derive(Clone, Default)]
    struct RecordingSink {
        appends: Arc<Mutex<Vec<Vec<TransactionRecord>>>>,
        fail_with: Option<&'static str>,
    }

    impl RecordingSink {
        fn append_count(&self) -> usize {
            self.appends.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl RowSink for RecordingSink {
        type Error = String;

        async fn append(
            &self,
            rows: &[TransactionRecord],
        ) -> std::result::Result<(), Self::Error> {
            if let Some(message) = self.fail_with {
                return Err(message.to_string());
            }
            self.appends.lock().unwrap().push(rows.to_vec());
            Ok(())
        }
    }

    fn query() -> Query {
        Query::new("from:a@b.c subject:X after:2024/05/01")
    }

    #[tokio::test]
    async fn test_empty_inbox_short_circuits() {
        let source = StubSource { messages: vec![] };
        let llm = MockProvider::new(RESPONSE);
        let extractor = Extractor::new(llm.clone(), ExtractorConfig::default());
        let sink = RecordingSink::default();

        let summary = run(&source, &extractor, &sink, &query()).await.unwrap();

        assert_eq!(summary, RunSummary::default());
        // Zero model calls and zero sink calls
        assert_eq!(llm.call_count(), 0);
        assert_eq!(sink.append_count(), 0);
    }

    #[tokio::test]
    async fn test_full_run_appends_one_row_per_message() {
        let source = StubSource {
            messages: vec![
                RawMessage::new("alert one"),
                RawMessage::new("alert two"),
                RawMessage::new("alert three"),
            ],
        };
        let llm = MockProvider::new(RESPONSE);
        let extractor = Extractor::new(llm.clone(), ExtractorConfig::default());
        let sink = RecordingSink::default();

        let summary = run(&source, &extractor, &sink, &query()).await.unwrap();

        assert_eq!(summary.fetched, 3);
        assert_eq!(summary.extracted, 3);
        assert_eq!(summary.appended, 3);
        assert_eq!(summary.skipped, 0);
        assert_eq!(llm.call_count(), 3);

        let appends = sink.appends.lock().unwrap();
        assert_eq!(appends.len(), 1);
        assert_eq!(appends[0].len(), 3);
        assert_eq!(appends[0][0].merchant, "ABC FOODS");
    }

    #[tokio::test]
    async fn test_sink_failure_propagates_original_text() {
        let source = StubSource {
            messages: vec![RawMessage::new("alert")],
        };
        let extractor = Extractor::new(MockProvider::new(RESPONSE), ExtractorConfig::default());
        let sink = RecordingSink {
            fail_with: Some("quota exceeded for sheet"),
            ..RecordingSink::default()
        };

        let err = run(&source, &extractor, &sink, &query()).await.unwrap_err();

        assert!(matches!(err, CliError::Upload(_)));
        assert!(err.to_string().contains("quota exceeded for sheet"));
    }

    #[tokio::test]
    async fn test_all_messages_skipped_means_no_sink_call() {
        let source = StubSource {
            messages: vec![RawMessage::new("alert")],
        };
        let llm = MockProvider::new("not json at all");
        let config = ExtractorConfig {
            failure_policy: FailurePolicy::Skip,
            ..ExtractorConfig::default()
        };
        let extractor = Extractor::new(llm, config);
        let sink = RecordingSink::default();

        let summary = run(&source, &extractor, &sink, &query()).await.unwrap();

        assert_eq!(summary.fetched, 1);
        assert_eq!(summary.extracted, 0);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.appended, 0);
        assert_eq!(sink.append_count(), 0);
    }

    #[tokio::test]
    async fn test_malformed_response_aborts_by_default() {
        let source = StubSource {
            messages: vec![RawMessage::new("alert")],
        };
        let extractor = Extractor::new(
            MockProvider::new("not json at all"),
            ExtractorConfig::default(),
        );
        let sink = RecordingSink::default();

        let err = run(&source, &extractor, &sink, &query()).await.unwrap_err();

        assert!(matches!(err, CliError::Extraction(_)));
        assert_eq!(sink.append_count(), 0);
    }
}
