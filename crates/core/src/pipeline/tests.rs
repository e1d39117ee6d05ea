use std::sync::Arc;

use chrono::NaiveDate;
use ledgerlens_shared::{AppConfig, AppError};
use rust_decimal_macros::dec;

use super::*;
use crate::comparison::ChangeType;
use crate::journal::{JournalEntry, JournalLine};
use crate::rows::{ReportCell, ReportNode};
use crate::sources::{ConnectionStatus, DatasetSource, Entity, JournalQuery};

fn date(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, m, d).unwrap()
}

fn bank(amount: &str) -> Vec<ReportNode> {
    vec![
        ReportNode::Section {
            title: "Bank".into(),
            rows: vec![ReportNode::Row {
                cells: vec![ReportCell::new("Cash"), ReportCell::new(amount)],
            }],
        },
        ReportNode::Section {
            title: "Equity".into(),
            rows: vec![ReportNode::Row {
                cells: vec![ReportCell::new("Capital"), ReportCell::new(amount)],
            }],
        },
    ]
}

fn journal(id: &str, day: u32, amounts: &[i64]) -> JournalEntry {
    JournalEntry {
        id: id.into(),
        number: String::new(),
        reference: String::new(),
        date: date(3, day),
        status: "POSTED".into(),
        lines: amounts
            .iter()
            .map(|a| JournalLine {
                account_code: "100".into(),
                account_name: "Sundry".into(),
                description: String::new(),
                amount: (*a).into(),
            })
            .collect(),
    }
}

fn dataset() -> DatasetSource {
    DatasetSource::default()
        .with_entity(Entity::connected("acme", "Acme Ltd"))
        .with_entity(Entity::connected("beta", "Beta Pty"))
        .with_entity(Entity {
            id: "gone".into(),
            name: "Gone Co".into(),
            status: ConnectionStatus::Disconnected,
        })
        .with_reports("acme", date(2, 28), Some(bank("1000")), Some(Vec::new()))
        .with_reports("acme", date(3, 31), Some(bank("250000")), None)
        .with_reports("beta", date(3, 31), Some(bank("500")), Some(Vec::new()))
        .with_journals(
            "acme",
            vec![
                journal("j1", 1, &[100, -100]),
                journal("j2", 2, &[700]),
                journal("j3", 3, &[50, -40]),
            ],
        )
}

fn pipeline() -> LedgerPipeline<DatasetSource> {
    LedgerPipeline::new(Arc::new(dataset()), AppConfig::default())
}

#[test]
fn test_resolve_report_date() {
    let today = date(3, 31);
    assert_eq!(resolve_report_date(None, today).unwrap(), today);
    assert_eq!(resolve_report_date(Some("  "), today).unwrap(), today);
    assert_eq!(resolve_report_date(Some("2025-02-28"), today).unwrap(), date(2, 28));

    let err = resolve_report_date(Some("31/03/2025"), today).unwrap_err();
    assert!(matches!(err, PipelineError::InvalidReportDate(_)));
    assert_eq!(AppError::from(err).status_code(), 400);
}

#[tokio::test]
async fn test_resolve_entity_by_id_or_name() {
    let source = &dataset();

    assert_eq!(resolve_entity(source, "beta").await.unwrap().name, "Beta Pty");
    assert_eq!(resolve_entity(source, "acme ltd").await.unwrap().id.as_str(), "acme");

    let err = resolve_entity(source, "nobody").await.unwrap_err();
    assert_eq!(err.error_code(), "ENTITY_NOT_FOUND");
    assert_eq!(AppError::from(err).status_code(), 404);
}

#[tokio::test]
async fn test_connected_entities_skips_disconnected() {
    let entities = connected_entities(&dataset()).await.unwrap();
    let ids: Vec<&str> = entities.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, ["acme", "beta"]);
}

#[tokio::test]
async fn test_entity_trial_balance_without_profit_and_loss() {
    let tb = pipeline()
        .entity_trial_balance("acme", date(3, 31))
        .await
        .unwrap();
    assert_eq!(tb.entity_name, "Acme Ltd");
    assert_eq!(tb.totals.total_assets, dec!(250000));
    assert!(tb.balance_check.debits_equal_credits);
}

#[tokio::test]
async fn test_entity_trial_balance_missing_balance_sheet() {
    let err = pipeline()
        .entity_trial_balance("beta", date(2, 28))
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "SOURCE_UNAVAILABLE");
    assert_eq!(AppError::from(err).status_code(), 502);
}

#[tokio::test]
async fn test_portfolio_consolidates_connected_entities() {
    let portfolio = pipeline().portfolio_trial_balance(date(3, 31)).await.unwrap();
    assert_eq!(portfolio.summary.requested_companies, 2);
    assert_eq!(portfolio.summary.total_companies, 2);
    assert_eq!(portfolio.consolidated.totals.total_assets, dec!(250500));
    assert!(portfolio.missing_entities.is_empty());
}

#[tokio::test]
async fn test_screen_journals_in_date_range() {
    let pipeline = pipeline();
    let query = JournalQuery {
        date_from: date(3, 1),
        date_to: date(3, 2),
        account_name: None,
    };

    let all = pipeline.screen_journals("acme", &query, false).await.unwrap();
    assert_eq!(all.summary.total_entries, 2);
    assert_eq!(all.entries[0].entry.id.as_str(), "j2");

    let suspicious = pipeline.screen_journals("acme", &query, true).await.unwrap();
    assert_eq!(suspicious.entries.len(), 1);
    assert_eq!(suspicious.entries[0].imbalance, dec!(700));
}

#[tokio::test]
async fn test_compare_entity_between_dates() {
    let comparison = pipeline()
        .compare_entity("acme", date(2, 28), date(3, 31))
        .await
        .unwrap();

    assert_eq!(comparison.from_date, date(2, 28));
    assert_eq!(comparison.changes.len(), 2);
    assert!(comparison
        .changes
        .iter()
        .all(|c| c.change_type == ChangeType::Increase && c.delta == dec!(249000)));
    assert_eq!(comparison.significant.len(), 2);
    assert_eq!(comparison.equity_alerts.len(), 1);
    assert_eq!(comparison.equity_alerts[0].account_name, "Capital");
}

#[tokio::test]
async fn test_compare_portfolio_tolerates_missing_period() {
    let comparison = pipeline()
        .compare_portfolio(date(2, 28), date(3, 31))
        .await
        .unwrap();

    // beta has no February report; February covers acme alone.
    let cash = comparison
        .changes
        .iter()
        .find(|c| c.account_name == "Cash")
        .unwrap();
    assert_eq!(cash.from_balance, dec!(1000));
    assert_eq!(cash.to_balance, dec!(250500));
}
