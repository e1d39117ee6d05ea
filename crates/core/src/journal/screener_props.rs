//! Property-based tests for the journal screener.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::screener::JournalScreener;
use super::types::{JournalEntry, JournalLine, Severity};

fn entry_from(amounts: &[i64]) -> JournalEntry {
    JournalEntry {
        id: "p".into(),
        number: String::new(),
        reference: String::new(),
        date: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
        status: "POSTED".to_string(),
        lines: amounts
            .iter()
            .map(|cents| JournalLine {
                account_code: String::new(),
                account_name: "Account".to_string(),
                description: String::new(),
                amount: Decimal::new(*cents, 2),
            })
            .collect(),
    }
}

fn amounts_strategy() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-1_000_000_000i64..1_000_000_000, 0..12)
}

proptest! {
    /// Property: imbalance = debits - credits and both totals are non-negative.
    #[test]
    fn test_totals_and_imbalance(amounts in amounts_strategy()) {
        let s = JournalScreener::default().score(&entry_from(&amounts));
        prop_assert!(s.total_debits >= Decimal::ZERO);
        prop_assert!(s.total_credits >= Decimal::ZERO);
        prop_assert_eq!(s.imbalance, s.total_debits - s.total_credits);
        let net: Decimal = amounts.iter().map(|c| Decimal::new(*c, 2)).sum();
        prop_assert_eq!(s.imbalance, net);
    }

    /// Property: severity is NONE exactly when no flag fired.
    #[test]
    fn test_severity_none_iff_unflagged(amounts in amounts_strategy()) {
        let s = JournalScreener::default().score(&entry_from(&amounts));
        prop_assert_eq!(s.severity == Severity::None, !s.is_suspicious);
        prop_assert_eq!(s.is_suspicious, s.flags.any());
    }

    /// Property: an entry mirrored into a debit and a credit line is always balanced.
    #[test]
    fn test_mirrored_entry_is_balanced(cents in 1i64..1_000_000_000_000) {
        let s = JournalScreener::default().score(&entry_from(&[cents, -cents]));
        prop_assert!(s.is_balanced);
        prop_assert!(!s.flags.single_sided);
        prop_assert!(s.severity <= Severity::Medium);
    }
}
