//! Ledgermail - append bank transaction alerts from email to a spreadsheet.

use chrono::Utc;
use clap::Parser;
use ledgermail_cli::{pipeline, Cli, CliError, Config, Result};
use ledgermail_extractor::Extractor;
use ledgermail_llm::OpenRouterProvider;
use ledgermail_mail::{build_query, GmailSource, SearchCriteria};
use ledgermail_sheets::SheetSink;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(e) = run().await {
        eprintln!("Error encountered in main: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load or create config
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|_| {
            let cfg = Config::default();
            cfg.save().ok();
            cfg
        }),
    };

    // Apply per-run overrides
    if let Some(policy) = cli.on_malformed {
        config.extractor.failure_policy = policy.into();
    }

    config.validate()?;

    let api_key = std::env::var("OPENROUTER_API_KEY")
        .or_else(|_| std::env::var("OPENAI_API_KEY"))
        .map_err(|_| {
            CliError::Config("OPENROUTER_API_KEY (or OPENAI_API_KEY) must be set".into())
        })?;

    // One query per run, built from the current time
    let criteria = SearchCriteria {
        sender: config.mail.sender.clone(),
        subject_keyword: config.mail.subject_keyword.clone(),
    };
    let query = build_query(&criteria, Utc::now());

    // Collaborators are constructed once here and passed by reference
    let source = GmailSource::connect(&config.mail.client_secret_file, &config.mail.token_cache_file)
        .await
        .map_err(|e| CliError::Mail(e.to_string()))?;

    let provider = OpenRouterProvider::with_timeout(
        config.model.endpoint.as_str(),
        config.model.name.as_str(),
        api_key,
        config.extractor.request_timeout_secs,
    );
    let extractor = Extractor::new(provider, config.extractor.clone());

    let summary = if cli.dry_run {
        pipeline::run(&source, &extractor, &pipeline::DryRunSink, &query).await?
    } else {
        let sink = SheetSink::connect(
            &config.sheet.service_account_key_file,
            config.sheet.spreadsheet_id.as_str(),
            config.sheet.range.as_str(),
        )
        .await
        .map_err(|e| CliError::Upload(e.to_string()))?;

        pipeline::run(&source, &extractor, &sink, &query).await?
    };

    if summary.fetched == 0 {
        println!("No new emails to process. Transaction data is empty.");
    } else if cli.dry_run {
        println!(
            "Extracted {} record(s) ({} skipped); dry run, nothing appended.",
            summary.extracted, summary.skipped
        );
    } else {
        println!(
            "Appended {} row(s) ({} skipped).",
            summary.appended, summary.skipped
        );
    }

    Ok(())
}
