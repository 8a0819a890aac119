//! Ledgermail CLI library.
//!
//! This library provides the core functionality for the ledgermail
//! command-line tool: configuration management, pipeline orchestration,
//! and error handling.

pub mod cli;
pub mod config;
pub mod error;
pub mod pipeline;

pub use cli::Cli;
pub use config::Config;
pub use error::{CliError, Result};
pub use pipeline::{run, DryRunSink, RunSummary};
