//! Ledgermail Extractor
//!
//! Converts transaction-alert email bodies to structured records using an
//! LLM, one model call per message.
//!
//! # Overview
//!
//! The Extractor is the core of the pipeline. For each fetched email it
//! builds a prompt around the message body, submits it to the configured
//! LLM provider, and parses the raw text response against the extraction
//! schema.
//!
//! # Architecture
//!
//! ```text
//! RawMessage → PromptBuilder → LLM → parse_response → TransactionRecord
//! ```
//!
//! # Key Features
//!
//! - **Schema-driven format**: one schema description generates both the
//!   prompt's format instructions and the response parser, so the two can
//!   never drift apart
//! - **Per-message calls**: no batching, so one malformed response cannot
//!   corrupt the whole batch
//! - **Configurable failure policy**: abort the run on the first malformed
//!   response, or log and skip the offending message
//!
//! # Example Usage
//!
//! ```no_run
//! use ledgermail_domain::RawMessage;
//! use ledgermail_extractor::{Extractor, ExtractorConfig};
//! use ledgermail_llm::MockProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = MockProvider::new(r#"{"date": "2024-05-01", "time": "14:32",
//!     "amount": 2500.0, "merchant": "ABC FOODS", "status": "approved",
//!     "type": "debit"}"#);
//! let extractor = Extractor::new(provider, ExtractorConfig::default());
//!
//! let messages = vec![RawMessage::new("TRANSACTION APPROVED ...")];
//! let outcome = extractor.extract_all(&messages).await?;
//!
//! println!("Extracted: {} record(s)", outcome.records.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
mod parser;
mod prompt;
mod schema;
mod types;


pub use config::{ExtractorConfig, FailurePolicy};
pub use error::ExtractorError;
pub use extractor::Extractor;
pub use parser::parse_response;
pub use prompt::PromptBuilder;
pub use schema::{FieldKind, FieldSpec, RecordSchema};
pub use types::{ExtractionFailure, ExtractionOutcome};
