//! Journal domain types.

use chrono::NaiveDate;
use ledgerlens_shared::types::JournalId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One line of a manual journal. Positive amounts are debits, negative
/// amounts credits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalLine {
    /// Account code.
    #[serde(default)]
    pub account_code: String,
    /// Account name.
    #[serde(default)]
    pub account_name: String,
    /// Line description.
    #[serde(default)]
    pub description: String,
    /// Signed amount.
    pub amount: Decimal,
}

/// A manual journal entry as supplied by the journal source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    /// Entry identifier.
    pub id: JournalId,
    /// Journal number.
    #[serde(default)]
    pub number: String,
    /// Free-text reference / narration.
    #[serde(default)]
    pub reference: String,
    /// Posting date.
    pub date: NaiveDate,
    /// Upstream status (e.g. POSTED, DRAFT).
    #[serde(default)]
    pub status: String,
    /// Journal lines.
    #[serde(default)]
    pub lines: Vec<JournalLine>,
}

/// Severity verdict, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    /// No flag fired.
    None,
    /// Flagged, imbalance within the high threshold.
    Medium,
    /// Imbalance above the high threshold.
    High,
    /// Imbalance above the critical threshold.
    Critical,
}

/// Rule outcomes for one entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreeningFlags {
    /// Larger side exceeds the large-amount threshold.
    pub large_amount: bool,
    /// Debits and credits differ by at least the tolerance.
    pub unbalanced: bool,
    /// Entry has exactly one line.
    pub single_sided: bool,
    /// Some line's account name contains a watchlist term.
    pub matches_watchlist: bool,
}

impl ScreeningFlags {
    /// Returns true if any rule fired.
    #[must_use]
    pub const fn any(&self) -> bool {
        self.large_amount || self.unbalanced || self.single_sided || self.matches_watchlist
    }
}

/// A journal entry with its derived screening fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenedEntry {
    /// The entry as supplied.
    #[serde(flatten)]
    pub entry: JournalEntry,
    /// Sum of positive line amounts.
    pub total_debits: Decimal,
    /// Sum of negated negative line amounts.
    pub total_credits: Decimal,
    /// Total debits minus total credits.
    pub imbalance: Decimal,
    /// Whether the imbalance is within tolerance.
    pub is_balanced: bool,
    /// Rule outcomes.
    pub flags: ScreeningFlags,
    /// Severity verdict.
    pub severity: Severity,
    /// Whether any rule fired.
    pub is_suspicious: bool,
}

/// Counts over a screened result set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreeningSummary {
    /// Entries retained after filtering.
    pub total_entries: usize,
    /// Entries with at least one flag.
    pub suspicious_count: usize,
    /// Entries flagged unbalanced.
    pub unbalanced_count: usize,
    /// CRITICAL entries.
    pub critical: usize,
    /// HIGH entries.
    pub high: usize,
    /// MEDIUM entries.
    pub medium: usize,
}

impl ScreeningSummary {
    /// Tallies a screened entry.
    pub fn record(&mut self, screened: &ScreenedEntry) {
        self.total_entries += 1;
        if screened.is_suspicious {
            self.suspicious_count += 1;
        }
        if screened.flags.unbalanced {
            self.unbalanced_count += 1;
        }
        match screened.severity {
            Severity::Critical => self.critical += 1,
            Severity::High => self.high += 1,
            Severity::Medium => self.medium += 1,
            Severity::None => {}
        }
    }
}

/// Screening output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreeningReport {
    /// Screened entries in presentation order.
    pub entries: Vec<ScreenedEntry>,
    /// Counts over every entry that passed the account filter.
    pub summary: ScreeningSummary,
}
