//! Property-based tests for consolidation arithmetic.

use chrono::NaiveDate;
use ledgerlens_shared::types::EntityId;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::service::Consolidator;
use crate::rows::{ReportCell, ReportNode};
use crate::sources::Entity;
use crate::trial_balance::{EntityTrialBalance, TrialBalanceBuilder};

const SECTIONS: &[&str] = &["Bank", "Current Liabilities", "Equity", "Fixed Assets"];

fn company(index: usize, rows: &[(usize, i64)]) -> EntityTrialBalance {
    let forest: Vec<ReportNode> = rows
        .iter()
        .map(|(section, cents)| ReportNode::Section {
            title: SECTIONS[*section].to_string(),
            rows: vec![ReportNode::Row {
                cells: vec![
                    ReportCell::new("Line"),
                    ReportCell::new(Decimal::new(*cents, 2).to_string()),
                ],
            }],
        })
        .collect();
    TrialBalanceBuilder::default().build(
        EntityId::new(format!("e{index}")),
        "Entity",
        NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
        &forest,
        &[],
    )
}

fn portfolio_strategy() -> impl Strategy<Value = Vec<Vec<(usize, i64)>>> {
    prop::collection::vec(
        prop::collection::vec((0..SECTIONS.len(), -1_000_000i64..1_000_000), 0..8),
        0..6,
    )
}

proptest! {
    /// Property: every consolidated total is the sum of the company totals,
    /// independent of company order.
    #[test]
    fn test_consolidated_totals_are_order_independent_sums(
        specs in portfolio_strategy(),
        rotate in 0usize..6,
    ) {
        let date = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
        let companies: Vec<EntityTrialBalance> =
            specs.iter().enumerate().map(|(i, rows)| company(i, rows)).collect();
        let entities: Vec<Entity> = companies
            .iter()
            .map(|c| Entity::connected(c.entity_id.clone(), c.entity_name.clone()))
            .collect();

        let consolidator = Consolidator::default();
        let forward = consolidator.aggregate(
            date,
            entities.len(),
            entities.iter().zip(companies.iter().cloned().map(Ok)),
        );

        let mut shuffled: Vec<(Entity, EntityTrialBalance)> =
            entities.iter().cloned().zip(companies.iter().cloned()).collect();
        if !shuffled.is_empty() {
            let by = rotate % shuffled.len();
            shuffled.rotate_left(by);
        }
        let rotated = consolidator.aggregate(
            date,
            shuffled.len(),
            shuffled.iter().map(|(e, c)| (e, Ok(c.clone()))),
        );

        let debits: Decimal = companies.iter().map(|c| c.totals.total_debits).sum();
        let assets: Decimal = companies.iter().map(|c| c.totals.total_assets).sum();
        let liabilities: Decimal = companies.iter().map(|c| c.totals.total_liabilities).sum();
        prop_assert_eq!(forward.consolidated.totals.total_debits, debits);
        prop_assert_eq!(forward.consolidated.totals.total_assets, assets);
        prop_assert_eq!(forward.consolidated.totals.total_liabilities, liabilities);
        prop_assert_eq!(forward.consolidated, rotated.consolidated);
        prop_assert_eq!(forward.summary.total_accounts, rotated.summary.total_accounts);
    }
}
