//! Manual journal anomaly screening.
//!
//! This module scores manual journal entries:
//! - Debit/credit totals and imbalance per entry
//! - Rule-based flags (unbalanced, large amount, single-sided, watchlist)
//! - Severity verdicts and suspicious-entry listings

pub mod screener;
pub mod types;

#[cfg(test)]
mod screener_props;

pub use screener::JournalScreener;
pub use types::{
    JournalEntry, JournalLine, ScreenedEntry, ScreeningFlags, ScreeningReport, ScreeningSummary,
    Severity,
};
