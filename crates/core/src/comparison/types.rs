//! Comparison data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::classifier::AccountType;

/// Kind of change observed for an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeType {
    /// Balance went up.
    Increase,
    /// Balance went down.
    Decrease,
    /// Account only exists in the later snapshot.
    NewAccount,
    /// Account only exists in the earlier snapshot.
    Removed,
}

/// One account's movement between two snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodChange {
    /// Account name (matched exactly).
    pub account_name: String,
    /// Account type in the snapshot the account was taken from.
    pub account_type: AccountType,
    /// Earlier balance (zero for new accounts).
    pub from_balance: Decimal,
    /// Later balance (zero for removed accounts).
    pub to_balance: Decimal,
    /// `to_balance - from_balance`.
    pub delta: Decimal,
    /// Kind of change.
    pub change_type: ChangeType,
}

/// Result of comparing two snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodComparison {
    /// Earlier report date.
    pub from_date: NaiveDate,
    /// Later report date.
    pub to_date: NaiveDate,
    /// Reportable changes, largest `|delta|` first.
    pub changes: Vec<PeriodChange>,
    /// Changes above the significance threshold.
    pub significant: Vec<PeriodChange>,
    /// Equity movements above the unusual-equity threshold.
    pub equity_alerts: Vec<PeriodChange>,
}
