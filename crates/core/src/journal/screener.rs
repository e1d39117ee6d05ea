//! Journal anomaly screener.

use std::cmp::Ordering;

use ledgerlens_shared::ScreeningConfig;
use ledgerlens_shared::types::within_tolerance;
use rust_decimal::Decimal;
use tracing::info;

use super::types::{
    JournalEntry, ScreenedEntry, ScreeningFlags, ScreeningReport, ScreeningSummary, Severity,
};

/// Scores manual journal entries against configured thresholds.
#[derive(Debug, Clone)]
pub struct JournalScreener {
    config: ScreeningConfig,
    watchlist: Vec<String>,
}

impl Default for JournalScreener {
    fn default() -> Self {
        Self::new(ScreeningConfig::default())
    }
}

impl JournalScreener {
    /// Creates a screener. The configured watchlist is used for the
    /// watchlist rule; blank terms are ignored.
    #[must_use]
    pub fn new(config: ScreeningConfig) -> Self {
        let watchlist = config
            .watchlist
            .iter()
            .map(|term| term.trim().to_lowercase())
            .filter(|term| !term.is_empty())
            .collect();
        Self { config, watchlist }
    }

    /// Scores one entry over all of its lines.
    #[must_use]
    pub fn score(&self, entry: &JournalEntry) -> ScreenedEntry {
        // Saturate instead of overflowing; a saturated side is flagged as a
        // large amount anyway.
        let total_debits = entry
            .lines
            .iter()
            .map(|l| l.amount.max(Decimal::ZERO))
            .fold(Decimal::ZERO, Decimal::saturating_add);
        let total_credits = entry
            .lines
            .iter()
            .map(|l| (-l.amount).max(Decimal::ZERO))
            .fold(Decimal::ZERO, Decimal::saturating_add);
        let imbalance = total_debits - total_credits;
        let is_balanced = within_tolerance(imbalance, self.config.balance_tolerance);

        let flags = ScreeningFlags {
            large_amount: total_debits.max(total_credits) > self.config.large_amount_threshold,
            unbalanced: !is_balanced,
            single_sided: entry.lines.len() == 1,
            matches_watchlist: self.matches_watchlist(entry),
        };

        ScreenedEntry {
            entry: entry.clone(),
            total_debits,
            total_credits,
            imbalance,
            is_balanced,
            severity: self.severity(&flags, imbalance),
            is_suspicious: flags.any(),
            flags,
        }
    }

    /// General listing: every entry passing the account filter, newest first.
    ///
    /// Ties on date are broken by entry id.
    #[must_use]
    pub fn screen(
        &self,
        entries: &[JournalEntry],
        account_filter: Option<&str>,
    ) -> ScreeningReport {
        let (mut screened, summary) = self.score_filtered(entries, account_filter);
        screened.sort_by(|a, b| {
            b.entry
                .date
                .cmp(&a.entry.date)
                .then_with(|| a.entry.id.cmp(&b.entry.id))
        });
        ScreeningReport {
            entries: screened,
            summary,
        }
    }

    /// Suspicious entries only, largest absolute imbalance first.
    ///
    /// Ties on imbalance are broken by entry id. The summary still counts
    /// every entry that passed the account filter.
    #[must_use]
    pub fn find_suspicious(
        &self,
        entries: &[JournalEntry],
        account_filter: Option<&str>,
    ) -> ScreeningReport {
        let (screened, summary) = self.score_filtered(entries, account_filter);
        let mut suspicious: Vec<ScreenedEntry> =
            screened.into_iter().filter(|s| s.is_suspicious).collect();
        suspicious.sort_by(|a, b| {
            by_imbalance_desc(a, b).then_with(|| a.entry.id.cmp(&b.entry.id))
        });
        ScreeningReport {
            entries: suspicious,
            summary,
        }
    }

    fn score_filtered(
        &self,
        entries: &[JournalEntry],
        account_filter: Option<&str>,
    ) -> (Vec<ScreenedEntry>, ScreeningSummary) {
        let filter = account_filter
            .map(|f| f.trim().to_lowercase())
            .filter(|f| !f.is_empty());

        let mut summary = ScreeningSummary::default();
        let screened: Vec<ScreenedEntry> = entries
            .iter()
            .filter(|entry| {
                filter.as_deref().is_none_or(|needle| {
                    entry
                        .lines
                        .iter()
                        .any(|l| l.account_name.to_lowercase().contains(needle))
                })
            })
            .map(|entry| self.score(entry))
            .inspect(|s| summary.record(s))
            .collect();

        info!(
            entries = entries.len(),
            retained = summary.total_entries,
            suspicious = summary.suspicious_count,
            critical = summary.critical,
            "Screened manual journals"
        );

        (screened, summary)
    }

    fn matches_watchlist(&self, entry: &JournalEntry) -> bool {
        entry.lines.iter().any(|line| {
            let name = line.account_name.to_lowercase();
            self.watchlist.iter().any(|term| name.contains(term))
        })
    }

    fn severity(&self, flags: &ScreeningFlags, imbalance: Decimal) -> Severity {
        if !flags.any() {
            return Severity::None;
        }
        let magnitude = imbalance.abs();
        if magnitude > self.config.critical_imbalance_threshold {
            Severity::Critical
        } else if magnitude > self.config.high_imbalance_threshold {
            Severity::High
        } else {
            Severity::Medium
        }
    }
}

fn by_imbalance_desc(a: &ScreenedEntry, b: &ScreenedEntry) -> Ordering {
    b.imbalance.abs().cmp(&a.imbalance.abs())
}
