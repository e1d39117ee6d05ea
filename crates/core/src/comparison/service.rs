//! Period comparator.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use ledgerlens_shared::ComparisonConfig;
use rust_decimal::Decimal;

use super::types::{ChangeType, PeriodChange, PeriodComparison};
use crate::classifier::{AccountRecord, AccountType};
use crate::consolidation::PortfolioTrialBalance;
use crate::trial_balance::EntityTrialBalance;

/// A balance-sheet account as seen by the comparator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotLine {
    /// Account type.
    pub account_type: AccountType,
    /// Balance; identically named accounts are summed.
    pub balance: Decimal,
}

/// Anything that exposes a dated set of balance-sheet accounts.
pub trait BalanceSnapshot {
    /// Report date of the snapshot.
    fn snapshot_date(&self) -> NaiveDate;

    /// Asset, liability and equity balances keyed by exact account name.
    fn balance_sheet_lines(&self) -> BTreeMap<String, SnapshotLine>;
}

fn accumulate<'a>(
    lines: &mut BTreeMap<String, SnapshotLine>,
    accounts: impl Iterator<Item = &'a AccountRecord>,
) {
    for account in accounts {
        lines
            .entry(account.name.clone())
            .and_modify(|line| line.balance = line.balance.saturating_add(account.balance))
            .or_insert(SnapshotLine {
                account_type: account.account_type,
                balance: account.balance,
            });
    }
}

impl BalanceSnapshot for EntityTrialBalance {
    fn snapshot_date(&self) -> NaiveDate {
        self.report_date
    }

    fn balance_sheet_lines(&self) -> BTreeMap<String, SnapshotLine> {
        let mut lines = BTreeMap::new();
        accumulate(&mut lines, self.accounts.balance_sheet());
        lines
    }
}

impl BalanceSnapshot for PortfolioTrialBalance {
    fn snapshot_date(&self) -> NaiveDate {
        self.report_date
    }

    fn balance_sheet_lines(&self) -> BTreeMap<String, SnapshotLine> {
        let mut lines = BTreeMap::new();
        for company in &self.companies {
            accumulate(&mut lines, company.accounts.balance_sheet());
        }
        lines
    }
}

/// Compares two snapshots account by account.
#[derive(Debug, Clone, Default)]
pub struct PeriodComparator {
    config: ComparisonConfig,
}

impl PeriodComparator {
    /// Creates a comparator.
    #[must_use]
    pub const fn new(config: ComparisonConfig) -> Self {
        Self { config }
    }

    /// Compares `from` (earlier) against `to` (later).
    ///
    /// Accounts present in both are reported when `|delta|` exceeds the
    /// change threshold; accounts only in `to` are reported as new when their
    /// balance does. Accounts only in `from` are reported as removed only if
    /// `report_removed` is set.
    #[must_use]
    pub fn compare<T: BalanceSnapshot + ?Sized>(&self, from: &T, to: &T) -> PeriodComparison {
        let before = from.balance_sheet_lines();
        let after = to.balance_sheet_lines();

        let mut candidates = Vec::new();
        for (name, line) in &after {
            let change = match before.get(name) {
                Some(previous) => {
                    let delta = line.balance.saturating_sub(previous.balance);
                    PeriodChange {
                        account_name: name.clone(),
                        account_type: line.account_type,
                        from_balance: previous.balance,
                        to_balance: line.balance,
                        delta,
                        change_type: if delta > Decimal::ZERO {
                            ChangeType::Increase
                        } else {
                            ChangeType::Decrease
                        },
                    }
                }
                None => PeriodChange {
                    account_name: name.clone(),
                    account_type: line.account_type,
                    from_balance: Decimal::ZERO,
                    to_balance: line.balance,
                    delta: line.balance,
                    change_type: ChangeType::NewAccount,
                },
            };
            candidates.push(change);
        }

        if self.config.report_removed {
            for (name, line) in before.iter().filter(|(name, _)| !after.contains_key(*name)) {
                candidates.push(PeriodChange {
                    account_name: name.clone(),
                    account_type: line.account_type,
                    from_balance: line.balance,
                    to_balance: Decimal::ZERO,
                    delta: -line.balance,
                    change_type: ChangeType::Removed,
                });
            }
        }

        candidates.sort_by(|a, b| {
            b.delta
                .abs()
                .cmp(&a.delta.abs())
                .then_with(|| a.account_name.cmp(&b.account_name))
        });

        let equity_alerts = candidates
            .iter()
            .filter(|c| {
                c.account_type == AccountType::Equity
                    && c.delta.abs() > self.config.unusual_equity_threshold
            })
            .cloned()
            .collect();
        let changes: Vec<PeriodChange> = candidates
            .into_iter()
            .filter(|c| c.delta.abs() > self.config.change_threshold)
            .collect();
        let significant = changes
            .iter()
            .filter(|c| c.delta.abs() > self.config.significant_threshold)
            .cloned()
            .collect();

        PeriodComparison {
            from_date: from.snapshot_date(),
            to_date: to.snapshot_date(),
            changes,
            significant,
            equity_alerts,
        }
    }
}
