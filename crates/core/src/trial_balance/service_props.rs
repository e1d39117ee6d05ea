//! Property-based tests for the trial balance builder.

use chrono::NaiveDate;
use ledgerlens_shared::types::EntityId;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::service::TrialBalanceBuilder;
use crate::rows::{ReportCell, ReportNode};

const SECTIONS: &[&str] = &[
    "Bank",
    "Current Assets",
    "Current Liabilities",
    "Equity",
    "Income",
    "Less Operating Expenses",
    "Unmapped",
];

fn forest(rows: &[(usize, i64)]) -> Vec<ReportNode> {
    rows.iter()
        .enumerate()
        .map(|(i, (section, cents))| ReportNode::Section {
            title: SECTIONS[*section].to_string(),
            rows: vec![ReportNode::Row {
                cells: vec![
                    ReportCell::new(format!("Account {}", i % 5)),
                    ReportCell::new(Decimal::new(*cents, 2).to_string()),
                ],
            }],
        })
        .collect()
}

fn rows_strategy() -> impl Strategy<Value = Vec<(usize, i64)>> {
    prop::collection::vec((0..SECTIONS.len(), -10_000_000i64..10_000_000), 0..30)
}

proptest! {
    /// Property: totalDebits and totalCredits equal the exact sums over owned accounts.
    #[test]
    fn test_totals_equal_account_sums(bs in rows_strategy(), pl in rows_strategy()) {
        let tb = TrialBalanceBuilder::default().build(
            EntityId::new("e"),
            "E",
            NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
            &forest(&bs),
            &forest(&pl),
        );

        let debits: Decimal = tb.accounts.iter().map(|a| a.debit).sum();
        let credits: Decimal = tb.accounts.iter().map(|a| a.credit).sum();
        prop_assert_eq!(tb.totals.total_debits, debits);
        prop_assert_eq!(tb.totals.total_credits, credits);
        prop_assert_eq!(tb.row_counts.admitted, tb.accounts.len());
        prop_assert_eq!(
            tb.row_counts.processed,
            tb.row_counts.admitted
                + tb.row_counts.skipped_totals
                + tb.row_counts.skipped_zero
                + tb.row_counts.unclassified
                + tb.row_counts.malformed
        );
    }

    /// Property: exactly one of debit/credit is non-zero and the balance matches the split.
    #[test]
    fn test_every_account_respects_sign_convention(bs in rows_strategy()) {
        let tb = TrialBalanceBuilder::default().build(
            EntityId::new("e"),
            "E",
            NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
            &forest(&bs),
            &[],
        );
        for account in tb.accounts.iter() {
            prop_assert!(account.debit.is_zero() ^ account.credit.is_zero());
            prop_assert_eq!(account.signed_balance(), account.balance);
        }
    }

    /// Property: building twice from identical rows yields byte-identical JSON.
    #[test]
    fn test_build_is_idempotent(bs in rows_strategy(), pl in rows_strategy()) {
        let builder = TrialBalanceBuilder::default();
        let date = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        let first = builder.build(EntityId::new("e"), "E", date, &forest(&bs), &forest(&pl));
        let second = builder.build(EntityId::new("e"), "E", date, &forest(&bs), &forest(&pl));
        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
