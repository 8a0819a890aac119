//! Ledgermail Sheets Layer
//!
//! The `RowSink` implementation backed by the Google Sheets API.
//!
//! Appends are not idempotent: repeated runs over overlapping time windows
//! can append duplicate rows. That is accepted by design; the one-day mail
//! lookback is meant to line up with a once-daily run cadence.

#![warn(missing_docs)]

mod error;
mod sink;

pub use error::SheetError;
pub use sink::SheetSink;
