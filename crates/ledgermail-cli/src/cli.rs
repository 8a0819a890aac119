//! CLI argument parsing.

use clap::Parser;
use ledgermail_extractor::FailurePolicy;
use std::path::PathBuf;

/// Ledgermail - extract bank transaction alerts from email into a spreadsheet.
#[derive(Debug, Parser)]
#[command(name = "ledgermail")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the malformed-output policy for this run
    #[arg(long, value_enum)]
    pub on_malformed: Option<CliFailurePolicy>,

    /// Print extracted rows instead of appending to the spreadsheet
    #[arg(long)]
    pub dry_run: bool,
}

/// Malformed-output policy options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFailurePolicy {
    /// Abort the run on the first malformed model response
    Abort,
    /// Log and skip messages with malformed model responses
    Skip,
}

impl From<CliFailurePolicy> for FailurePolicy {
    fn from(policy: CliFailurePolicy) -> Self {
        match policy {
            CliFailurePolicy::Abort => FailurePolicy::Abort,
            CliFailurePolicy::Skip => FailurePolicy::Skip,
        }
    }
}
