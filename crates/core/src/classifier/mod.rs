//! Account classification.
//!
//! Turns one raw report row (name, balance, enclosing section title) into a
//! typed [`AccountRecord`] with debit/credit magnitudes assigned by the
//! double-entry sign convention.

pub mod rules;
pub mod types;

pub use rules::{CLASSIFICATION_RULES, ClassificationRule, type_for_section};
pub use types::{AccountRecord, AccountType, Classification, ReportKind, SkipReason};

use rust_decimal::Decimal;

/// Stateless account classifier.
pub struct AccountClassifier;

impl AccountClassifier {
    /// Classifies a balance-sheet row.
    ///
    /// Rows whose name contains "total", rows with a zero balance and rows in
    /// sections that match no rule are skipped.
    #[must_use]
    pub fn classify(row_name: &str, balance: Decimal, section_title: &str) -> Classification {
        Self::classify_for_report(ReportKind::BalanceSheet, row_name, balance, section_title)
    }

    /// Classifies a row from the given kind of report.
    ///
    /// On a profit-and-loss report revenue is always credited and expense
    /// always debited with `|balance|`, following the report's own sign
    /// convention rather than the raw sign.
    #[must_use]
    pub fn classify_for_report(
        report: ReportKind,
        row_name: &str,
        balance: Decimal,
        section_title: &str,
    ) -> Classification {
        if row_name.to_lowercase().contains("total") {
            return Classification::Skipped(SkipReason::TotalRow);
        }
        if balance.is_zero() {
            return Classification::Skipped(SkipReason::ZeroBalance);
        }
        let Some(account_type) = type_for_section(section_title) else {
            return Classification::Skipped(SkipReason::Unclassified);
        };

        let (debit, credit, balance) = match (report, account_type) {
            (ReportKind::ProfitAndLoss, AccountType::Revenue) => {
                (Decimal::ZERO, balance.abs(), balance.abs())
            }
            (ReportKind::ProfitAndLoss, AccountType::Expense) => {
                (balance.abs(), Decimal::ZERO, balance.abs())
            }
            (_, t) if t.is_debit_normal() => (
                balance.max(Decimal::ZERO),
                (-balance).max(Decimal::ZERO),
                balance,
            ),
            _ => (
                (-balance).max(Decimal::ZERO),
                balance.max(Decimal::ZERO),
                balance,
            ),
        };

        Classification::Account(AccountRecord {
            name: row_name.to_string(),
            code: None,
            account_type,
            section: section_title.to_string(),
            balance,
            debit,
            credit,
        })
    }
}
