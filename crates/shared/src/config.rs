//! Application configuration management.

use std::time::Duration;

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Journal screening thresholds.
    #[serde(default)]
    pub screening: ScreeningConfig,
    /// Period comparison thresholds.
    #[serde(default)]
    pub comparison: ComparisonConfig,
    /// Consolidation fan-out limits.
    #[serde(default)]
    pub consolidation: ConsolidationConfig,
    /// Log output configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Journal screening configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ScreeningConfig {
    /// An entry whose larger side exceeds this is flagged as a large amount.
    #[serde(default = "default_large_amount")]
    pub large_amount_threshold: Decimal,
    /// Imbalance above this is CRITICAL.
    #[serde(default = "default_critical_imbalance")]
    pub critical_imbalance_threshold: Decimal,
    /// Imbalance above this is HIGH.
    #[serde(default = "default_high_imbalance")]
    pub high_imbalance_threshold: Decimal,
    /// Imbalances strictly below this count as balanced.
    #[serde(default = "default_tolerance")]
    pub balance_tolerance: Decimal,
    /// Sensitive account name fragments (matched case-insensitively).
    #[serde(default)]
    pub watchlist: Vec<String>,
}

fn default_large_amount() -> Decimal {
    Decimal::from(1_000_000)
}

fn default_critical_imbalance() -> Decimal {
    Decimal::from(1_000_000)
}

fn default_high_imbalance() -> Decimal {
    Decimal::from(100_000)
}

fn default_tolerance() -> Decimal {
    Decimal::new(1, 2) // 0.01
}

impl Default for ScreeningConfig {
    fn default() -> Self {
        Self {
            large_amount_threshold: default_large_amount(),
            critical_imbalance_threshold: default_critical_imbalance(),
            high_imbalance_threshold: default_high_imbalance(),
            balance_tolerance: default_tolerance(),
            watchlist: Vec::new(),
        }
    }
}

/// Period comparison configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ComparisonConfig {
    /// Changes at or below this magnitude are not reported.
    #[serde(default = "default_change_threshold")]
    pub change_threshold: Decimal,
    /// Changes above this magnitude are significant.
    #[serde(default = "default_significant_threshold")]
    pub significant_threshold: Decimal,
    /// Equity movements above this magnitude raise an alert.
    #[serde(default = "default_unusual_equity_threshold")]
    pub unusual_equity_threshold: Decimal,
    /// Emit REMOVED changes for accounts that disappeared.
    #[serde(default)]
    pub report_removed: bool,
}

fn default_change_threshold() -> Decimal {
    Decimal::from(1_000)
}

fn default_significant_threshold() -> Decimal {
    Decimal::from(100_000)
}

fn default_unusual_equity_threshold() -> Decimal {
    Decimal::from(10_000)
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            change_threshold: default_change_threshold(),
            significant_threshold: default_significant_threshold(),
            unusual_equity_threshold: default_unusual_equity_threshold(),
            report_removed: false,
        }
    }
}

/// Consolidation configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ConsolidationConfig {
    /// Maximum number of entity fetches in flight.
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
    /// Timeout for a single entity fetch in milliseconds.
    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,
    /// Deadline for the whole consolidation call in milliseconds.
    #[serde(default = "default_deadline_ms")]
    pub deadline_ms: u64,
    /// Tolerance used for the balance checks.
    #[serde(default = "default_tolerance")]
    pub balance_tolerance: Decimal,
}

fn default_max_concurrency() -> usize {
    4
}

fn default_fetch_timeout_ms() -> u64 {
    15_000
}

fn default_deadline_ms() -> u64 {
    60_000
}

impl ConsolidationConfig {
    /// Per-entity fetch timeout.
    #[must_use]
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    /// Deadline for the whole consolidation call.
    #[must_use]
    pub fn deadline(&self) -> Duration {
        Duration::from_millis(self.deadline_ms)
    }
}

impl Default for ConsolidationConfig {
    fn default() -> Self {
        Self {
            max_concurrency: default_max_concurrency(),
            fetch_timeout_ms: default_fetch_timeout_ms(),
            deadline_ms: default_deadline_ms(),
            balance_tolerance: default_tolerance(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default `EnvFilter` directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON log lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

fn default_log_filter() -> String {
    "ledgerlens=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("LEDGERLENS")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("screening.watchlist")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
