//! Trial balance data types.
//!
//! Field names serialize in camelCase; the JSON shape is the contract
//! consumed by presentation layers.

use std::ops::AddAssign;

use chrono::NaiveDate;
use ledgerlens_shared::types::{EntityId, within_tolerance};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::classifier::{AccountRecord, AccountType};

/// Accounts grouped by type, each group sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountsByType {
    /// Asset accounts.
    pub assets: Vec<AccountRecord>,
    /// Liability accounts.
    pub liabilities: Vec<AccountRecord>,
    /// Equity accounts.
    pub equity: Vec<AccountRecord>,
    /// Revenue accounts.
    pub revenue: Vec<AccountRecord>,
    /// Expense accounts.
    pub expenses: Vec<AccountRecord>,
}

impl AccountsByType {
    /// Appends a record to the bucket matching its type.
    pub fn push(&mut self, record: AccountRecord) {
        self.bucket_mut(record.account_type).push(record);
    }

    /// Returns the bucket for a type.
    #[must_use]
    pub fn bucket(&self, account_type: AccountType) -> &[AccountRecord] {
        match account_type {
            AccountType::Asset => &self.assets,
            AccountType::Liability => &self.liabilities,
            AccountType::Equity => &self.equity,
            AccountType::Revenue => &self.revenue,
            AccountType::Expense => &self.expenses,
        }
    }

    fn bucket_mut(&mut self, account_type: AccountType) -> &mut Vec<AccountRecord> {
        match account_type {
            AccountType::Asset => &mut self.assets,
            AccountType::Liability => &mut self.liabilities,
            AccountType::Equity => &mut self.equity,
            AccountType::Revenue => &mut self.revenue,
            AccountType::Expense => &mut self.expenses,
        }
    }

    /// Sorts every bucket by account name. Stable, so equal names keep
    /// their report order.
    pub fn sort_by_name(&mut self) {
        for bucket in [
            &mut self.assets,
            &mut self.liabilities,
            &mut self.equity,
            &mut self.revenue,
            &mut self.expenses,
        ] {
            bucket.sort_by(|a, b| a.name.cmp(&b.name));
        }
    }

    /// Iterates all accounts, bucket by bucket.
    pub fn iter(&self) -> impl Iterator<Item = &AccountRecord> {
        self.assets
            .iter()
            .chain(&self.liabilities)
            .chain(&self.equity)
            .chain(&self.revenue)
            .chain(&self.expenses)
    }

    /// Iterates asset, liability and equity accounts.
    pub fn balance_sheet(&self) -> impl Iterator<Item = &AccountRecord> {
        self.assets
            .iter()
            .chain(&self.liabilities)
            .chain(&self.equity)
    }

    /// Total number of accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assets.len()
            + self.liabilities.len()
            + self.equity.len()
            + self.revenue.len()
            + self.expenses.len()
    }

    /// Returns true if no account was admitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Trial balance totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialBalanceTotals {
    /// Sum of every account's debit.
    pub total_debits: Decimal,
    /// Sum of every account's credit.
    pub total_credits: Decimal,
    /// Sum of asset balances.
    pub total_assets: Decimal,
    /// Sum of liability balances.
    pub total_liabilities: Decimal,
    /// Sum of equity balances.
    pub total_equity: Decimal,
    /// Sum of revenue balances.
    pub total_revenue: Decimal,
    /// Sum of expense balances.
    pub total_expenses: Decimal,
}

impl TrialBalanceTotals {
    /// Returns the totals with one more account added, or `None` if any
    /// affected total would overflow.
    #[must_use]
    pub fn checked_record(&self, account: &AccountRecord) -> Option<Self> {
        let mut next = Self {
            total_debits: self.total_debits.checked_add(account.debit)?,
            total_credits: self.total_credits.checked_add(account.credit)?,
            ..*self
        };
        let bucket = match account.account_type {
            AccountType::Asset => &mut next.total_assets,
            AccountType::Liability => &mut next.total_liabilities,
            AccountType::Equity => &mut next.total_equity,
            AccountType::Revenue => &mut next.total_revenue,
            AccountType::Expense => &mut next.total_expenses,
        };
        *bucket = bucket.checked_add(account.balance)?;
        Some(next)
    }

    /// Field-wise sum of two sets of totals, or `None` on overflow.
    #[must_use]
    pub fn checked_add(&self, rhs: &Self) -> Option<Self> {
        Some(Self {
            total_debits: self.total_debits.checked_add(rhs.total_debits)?,
            total_credits: self.total_credits.checked_add(rhs.total_credits)?,
            total_assets: self.total_assets.checked_add(rhs.total_assets)?,
            total_liabilities: self.total_liabilities.checked_add(rhs.total_liabilities)?,
            total_equity: self.total_equity.checked_add(rhs.total_equity)?,
            total_revenue: self.total_revenue.checked_add(rhs.total_revenue)?,
            total_expenses: self.total_expenses.checked_add(rhs.total_expenses)?,
        })
    }
}

/// Assets = Liabilities + Equity check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountingEquation {
    /// Total assets.
    pub assets: Decimal,
    /// Total liabilities plus total equity.
    pub liabilities_and_equity: Decimal,
    /// Whether both sides agree within tolerance.
    pub balanced: bool,
}

/// Balance invariants. An unbalanced result is a valid, reportable outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceCheck {
    /// Whether total debits equal total credits within tolerance.
    pub debits_equal_credits: bool,
    /// Total debits minus total credits.
    pub difference: Decimal,
    /// Accounting equation check.
    pub accounting_equation: AccountingEquation,
}

impl BalanceCheck {
    /// Evaluates both invariants over a set of totals.
    #[must_use]
    pub fn evaluate(totals: &TrialBalanceTotals, tolerance: Decimal) -> Self {
        // Saturated values stay far outside any tolerance.
        let difference = totals.total_debits.saturating_sub(totals.total_credits);
        let liabilities_and_equity = totals.total_liabilities.saturating_add(totals.total_equity);
        let equation_gap = totals.total_assets.saturating_sub(liabilities_and_equity);

        Self {
            debits_equal_credits: within_tolerance(difference, tolerance),
            difference,
            accounting_equation: AccountingEquation {
                assets: totals.total_assets,
                liabilities_and_equity,
                balanced: within_tolerance(equation_gap, tolerance),
            },
        }
    }
}

/// How the builder disposed of report rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowCounts {
    /// Rows visited.
    pub processed: usize,
    /// Rows that became accounts.
    pub admitted: usize,
    /// Rows skipped because the name contains "total".
    pub skipped_totals: usize,
    /// Rows skipped because the balance was zero or not a number.
    pub skipped_zero: usize,
    /// Rows dropped because the section title matched no rule.
    pub unclassified: usize,
    /// Rows missing a name or balance cell, or whose balance would overflow
    /// the totals.
    pub malformed: usize,
}

impl AddAssign for RowCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.processed += rhs.processed;
        self.admitted += rhs.admitted;
        self.skipped_totals += rhs.skipped_totals;
        self.skipped_zero += rhs.skipped_zero;
        self.unclassified += rhs.unclassified;
        self.malformed += rhs.malformed;
    }
}

/// One entity's trial balance for one report date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityTrialBalance {
    /// Entity identifier.
    pub entity_id: EntityId,
    /// Entity display name.
    pub entity_name: String,
    /// Report date.
    pub report_date: NaiveDate,
    /// Accounts grouped by type.
    pub accounts: AccountsByType,
    /// Totals.
    pub totals: TrialBalanceTotals,
    /// Balance invariants.
    pub balance_check: BalanceCheck,
    /// Row disposition counters.
    pub row_counts: RowCounts,
}
