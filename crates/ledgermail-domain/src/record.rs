//! Record module - the transaction data flowing through the pipeline

use serde::{Deserialize, Serialize};

/// A single email fetched from the mail provider.
///
/// Only the body text survives the mail adapter; headers and metadata are
/// dropped at the boundary. Each message is owned by the pipeline for the
/// duration of one extraction call and discarded after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMessage {
    /// The message body text
    pub body: String,
}

impl RawMessage {
    /// Create a message from its body text
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

/// The structured transaction fields derived from one email body.
///
/// Records are created once by the extractor, immutable thereafter, and
/// consumed exactly once by the row sink. All fields are required; no
/// validation is applied beyond type coercion of `amount`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// The exact date of when the transaction occurred
    pub date: String,

    /// The exact time the transaction occurred
    pub time: String,

    /// The total cost of the transaction
    pub amount: f64,

    /// The person who the transaction occurred between
    pub merchant: String,

    /// Whether or not the transaction was approved or declined
    pub status: String,

    /// The type of transaction
    #[serde(rename = "type")]
    pub kind: String,
}

impl TransactionRecord {
    /// Render the record as one ordered spreadsheet row.
    ///
    /// Column order is the output contract: date, time, amount, merchant,
    /// status, type. `amount` is rendered with two decimal places.
    pub fn to_row(&self) -> [String; 6] {
        [
            self.date.clone(),
            self.time.clone(),
            format!("{:.2}", self.amount),
            self.merchant.clone(),
            self.status.clone(),
            self.kind.clone(),
        ]
    }
}
