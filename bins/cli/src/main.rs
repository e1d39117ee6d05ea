//! Ledgerlens CLI
//!
//! Main entry point for running the analyses against a JSON dataset.

mod cli;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use ledgerlens_core::pipeline::{LedgerPipeline, resolve_report_date};
use ledgerlens_core::sources::{DatasetSource, JournalQuery};
use ledgerlens_shared::{AppConfig, AppError, AppResult, LoggingConfig};

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(&config.logging);

    let text = std::fs::read_to_string(cli.command.dataset())
        .with_context(|| format!("Failed to read {}", cli.command.dataset().display()))?;
    let source = DatasetSource::from_json(&text).map_err(AppError::from)?;
    info!(dataset = %cli.command.dataset().display(), "Dataset loaded");

    let pipeline = LedgerPipeline::new(Arc::new(source), config);
    if let Err(err) = run(&pipeline, cli.command).await {
        error!(code = err.error_code(), status = err.status_code(), "{err}");
        return Err(err.into());
    }

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));

    // Logs go to stderr so stdout carries only the JSON result.
    tracing_subscriber::registry()
        .with(filter)
        .with(
            logging
                .json
                .then(|| fmt::layer().json().with_writer(std::io::stderr)),
        )
        .with((!logging.json).then(|| fmt::layer().with_writer(std::io::stderr)))
        .init();
}

async fn run(pipeline: &LedgerPipeline<DatasetSource>, command: Command) -> AppResult<()> {
    let today = chrono::Local::now().date_naive();

    match command {
        Command::TrialBalance { entity, date, .. } => {
            let date = resolve_report_date(date.as_deref(), today)?;
            print_json(&pipeline.entity_trial_balance(&entity, date).await?)?;
        }
        Command::Consolidate { date, .. } => {
            let date = resolve_report_date(date.as_deref(), today)?;
            print_json(&pipeline.portfolio_trial_balance(date).await?)?;
        }
        Command::Journals {
            entity,
            from,
            to,
            account,
            suspicious,
            ..
        } => {
            let query = JournalQuery {
                date_from: resolve_report_date(Some(&from), today)?,
                date_to: resolve_report_date(to.as_deref(), today)?,
                account_name: account,
            };
            print_json(&pipeline.screen_journals(&entity, &query, suspicious).await?)?;
        }
        Command::Compare {
            entity,
            from,
            to,
            ..
        } => {
            let from = resolve_report_date(Some(&from), today)?;
            let to = resolve_report_date(to.as_deref(), today)?;
            let comparison = match entity {
                Some(entity) => pipeline.compare_entity(&entity, from, to).await?,
                None => pipeline.compare_portfolio(from, to).await?,
            };
            print_json(&comparison)?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|err| AppError::Internal(format!("Failed to serialize result: {err}")))?;
    println!("{text}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn test_print_json_reports_serialization_failure() {
        // Non-string map keys cannot be written as JSON.
        let value = BTreeMap::from([((1u8, 2u8), "pair")]);

        let err = print_json(&value).unwrap_err();
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
        assert!(err.to_string().contains("Failed to serialize result"));
    }
}
