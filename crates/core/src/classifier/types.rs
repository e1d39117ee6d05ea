//! Classified account types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Account type.
///
/// In double-entry bookkeeping:
/// - Asset/Expense are debit-normal: balance = debit - credit
/// - Liability/Equity/Revenue are credit-normal: balance = credit - debit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    /// Asset.
    Asset,
    /// Liability.
    Liability,
    /// Equity.
    Equity,
    /// Revenue.
    Revenue,
    /// Expense.
    Expense,
}

impl AccountType {
    /// Returns true for debit-normal types (Asset, Expense).
    #[must_use]
    pub const fn is_debit_normal(self) -> bool {
        matches!(self, Self::Asset | Self::Expense)
    }

    /// Returns true for balance-sheet types (Asset, Liability, Equity).
    #[must_use]
    pub const fn is_balance_sheet(self) -> bool {
        matches!(self, Self::Asset | Self::Liability | Self::Equity)
    }
}

/// Which upstream report a row came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// Balance sheet: signed balances.
    BalanceSheet,
    /// Profit and loss: revenue credited and expense debited by magnitude.
    ProfitAndLoss,
}

/// A classified account line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRecord {
    /// Account name as reported.
    pub name: String,
    /// Upstream account identifier, if the report carried one.
    pub code: Option<String>,
    /// Account type.
    #[serde(rename = "type")]
    pub account_type: AccountType,
    /// Title of the enclosing report section.
    pub section: String,
    /// Signed balance.
    pub balance: Decimal,
    /// Debit magnitude (zero if credit).
    pub debit: Decimal,
    /// Credit magnitude (zero if debit).
    pub credit: Decimal,
}

impl AccountRecord {
    /// Balance recomputed from the debit/credit split and the type's normal side.
    #[must_use]
    pub fn signed_balance(&self) -> Decimal {
        if self.account_type.is_debit_normal() {
            self.debit - self.credit
        } else {
            self.credit - self.debit
        }
    }
}

/// Why a row did not become an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Name contains "total".
    TotalRow,
    /// Zero (or unparseable) balance.
    ZeroBalance,
    /// Section title matched no rule.
    Unclassified,
}

/// Classifier outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Row admitted as an account.
    Account(AccountRecord),
    /// Row dropped.
    Skipped(SkipReason),
}
