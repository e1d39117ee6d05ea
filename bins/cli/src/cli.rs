//! Command-line arguments.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

/// Trial balances, consolidation and journal screening over a dataset.
#[derive(Parser, Debug)]
#[command(name = "ledgerlens", version, about)]
pub struct Cli {
    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Dataset location shared by every command.
#[derive(Args, Debug)]
pub struct DatasetArgs {
    /// JSON dataset with entities, reports and journals.
    #[arg(short = 'd', long = "dataset", env = "LEDGERLENS_DATASET")]
    pub dataset: PathBuf,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Trial balance for one entity.
    TrialBalance {
        #[command(flatten)]
        source: DatasetArgs,
        /// Entity id or name.
        #[arg(short, long)]
        entity: String,
        /// Report date (YYYY-MM-DD), defaults to today.
        #[arg(long)]
        date: Option<String>,
    },
    /// Consolidated trial balance across every connected entity.
    Consolidate {
        #[command(flatten)]
        source: DatasetArgs,
        /// Report date (YYYY-MM-DD), defaults to today.
        #[arg(long)]
        date: Option<String>,
    },
    /// Screen manual journals for anomalies.
    Journals {
        #[command(flatten)]
        source: DatasetArgs,
        /// Entity id or name.
        #[arg(short, long)]
        entity: String,
        /// First date included (YYYY-MM-DD).
        #[arg(long)]
        from: String,
        /// Last date included (YYYY-MM-DD), defaults to today.
        #[arg(long)]
        to: Option<String>,
        /// Only entries with a line whose account name contains this text.
        #[arg(long)]
        account: Option<String>,
        /// List suspicious entries only, largest imbalance first.
        #[arg(long)]
        suspicious: bool,
    },
    /// Compare balance-sheet accounts between two dates.
    Compare {
        #[command(flatten)]
        source: DatasetArgs,
        /// Entity id or name; omit to compare the whole portfolio.
        #[arg(short, long)]
        entity: Option<String>,
        /// Earlier date (YYYY-MM-DD).
        #[arg(long)]
        from: String,
        /// Later date (YYYY-MM-DD), defaults to today.
        #[arg(long)]
        to: Option<String>,
    },
}

impl Command {
    /// Dataset path for the command.
    pub fn dataset(&self) -> &Path {
        match self {
            Self::TrialBalance { source, .. }
            | Self::Consolidate { source, .. }
            | Self::Journals { source, .. }
            | Self::Compare { source, .. } => &source.dataset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_journals_command() {
        let cli = Cli::try_parse_from([
            "ledgerlens",
            "journals",
            "--dataset",
            "data.json",
            "--entity",
            "acme",
            "--from",
            "2025-01-01",
            "--suspicious",
        ])
        .unwrap();

        match cli.command {
            Command::Journals {
                entity,
                suspicious,
                to,
                ..
            } => {
                assert_eq!(entity, "acme");
                assert!(suspicious);
                assert!(to.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_compare_entity_is_optional() {
        let cli = Cli::try_parse_from([
            "ledgerlens",
            "compare",
            "-d",
            "data.json",
            "--from",
            "2025-01-31",
        ])
        .unwrap();
        assert_eq!(cli.command.dataset(), Path::new("data.json"));
        assert!(matches!(cli.command, Command::Compare { entity: None, .. }));
    }
}
