//! In-memory source backed by a JSON dataset.
//!
//! Used by the command-line surface and by tests. The dataset mirrors what
//! the three collaborators would return:
//!
//! ```json
//! {
//!   "entities": [{"id": "acme", "name": "Acme Ltd", "status": "connected"}],
//!   "reports": [{"entityId": "acme", "reportDate": "2025-03-31",
//!                "balanceSheet": [...], "profitAndLoss": [...]}],
//!   "journals": [{"entityId": "acme", "entries": [...]}]
//! }
//! ```

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use ledgerlens_shared::types::EntityId;
use serde::Deserialize;

use super::error::SourceError;
use super::types::{Entity, JournalQuery};
use super::{EntityRegistry, JournalSource, ReportSource};
use crate::journal::JournalEntry;
use crate::rows::{RawReportNode, ReportNode, from_raw};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DatasetFile {
    #[serde(default)]
    entities: Vec<Entity>,
    #[serde(default)]
    reports: Vec<ReportFile>,
    #[serde(default)]
    journals: Vec<JournalFile>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReportFile {
    entity_id: EntityId,
    report_date: NaiveDate,
    balance_sheet: Option<Vec<RawReportNode>>,
    profit_and_loss: Option<Vec<RawReportNode>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JournalFile {
    entity_id: EntityId,
    entries: Vec<JournalEntry>,
}

#[derive(Debug, Default)]
struct ReportPair {
    balance_sheet: Option<Vec<ReportNode>>,
    profit_and_loss: Option<Vec<ReportNode>>,
}

/// Report, journal and registry source over an in-memory dataset.
#[derive(Debug, Default)]
pub struct DatasetSource {
    entities: Vec<Entity>,
    reports: HashMap<(EntityId, NaiveDate), ReportPair>,
    journals: HashMap<EntityId, Vec<JournalEntry>>,
}

impl DatasetSource {
    /// Parses a dataset from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text does not match the dataset shape.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let file: DatasetFile = serde_json::from_str(text)?;
        let mut source = Self {
            entities: file.entities,
            ..Self::default()
        };

        for report in file.reports {
            source.reports.insert(
                (report.entity_id, report.report_date),
                ReportPair {
                    balance_sheet: report.balance_sheet.as_deref().map(from_raw),
                    profit_and_loss: report.profit_and_loss.as_deref().map(from_raw),
                },
            );
        }
        for journal in file.journals {
            source
                .journals
                .entry(journal.entity_id)
                .or_default()
                .extend(journal.entries);
        }

        Ok(source)
    }

    /// Registers an entity.
    #[must_use]
    pub fn with_entity(mut self, entity: Entity) -> Self {
        self.entities.push(entity);
        self
    }

    /// Registers report trees for an entity and date. `None` makes the
    /// corresponding fetch fail.
    #[must_use]
    pub fn with_reports(
        mut self,
        entity_id: impl Into<EntityId>,
        report_date: NaiveDate,
        balance_sheet: Option<Vec<ReportNode>>,
        profit_and_loss: Option<Vec<ReportNode>>,
    ) -> Self {
        self.reports.insert(
            (entity_id.into(), report_date),
            ReportPair {
                balance_sheet,
                profit_and_loss,
            },
        );
        self
    }

    /// Registers manual journals for an entity.
    #[must_use]
    pub fn with_journals(
        mut self,
        entity_id: impl Into<EntityId>,
        entries: Vec<JournalEntry>,
    ) -> Self {
        self.journals
            .entry(entity_id.into())
            .or_default()
            .extend(entries);
        self
    }

    fn report(
        &self,
        entity_id: &EntityId,
        report_date: NaiveDate,
        name: &str,
        pick: impl Fn(&ReportPair) -> Option<&Vec<ReportNode>>,
    ) -> Result<Vec<ReportNode>, SourceError> {
        self.reports
            .get(&(entity_id.clone(), report_date))
            .and_then(pick)
            .cloned()
            .ok_or_else(|| SourceError::Unavailable {
                entity_id: entity_id.clone(),
                message: format!("no {name} for {report_date}"),
            })
    }
}

#[async_trait]
impl ReportSource for DatasetSource {
    async fn balance_sheet(
        &self,
        entity_id: &EntityId,
        report_date: NaiveDate,
    ) -> Result<Vec<ReportNode>, SourceError> {
        self.report(entity_id, report_date, "balance sheet", |p| {
            p.balance_sheet.as_ref()
        })
    }

    async fn profit_and_loss(
        &self,
        entity_id: &EntityId,
        report_date: NaiveDate,
    ) -> Result<Vec<ReportNode>, SourceError> {
        self.report(entity_id, report_date, "profit and loss", |p| {
            p.profit_and_loss.as_ref()
        })
    }
}

#[async_trait]
impl JournalSource for DatasetSource {
    async fn manual_journals(
        &self,
        entity_id: &EntityId,
        query: &JournalQuery,
    ) -> Result<Vec<JournalEntry>, SourceError> {
        let entries = self
            .journals
            .get(entity_id)
            .ok_or_else(|| SourceError::Unavailable {
                entity_id: entity_id.clone(),
                message: "no manual journals".to_string(),
            })?;

        Ok(entries
            .iter()
            .filter(|entry| query.contains(entry.date))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl EntityRegistry for DatasetSource {
    async fn entities(&self) -> Result<Vec<Entity>, SourceError> {
        Ok(self.entities.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::ConnectionStatus;

    const DATASET: &str = r#"{
        "entities": [
            {"id": "acme", "name": "Acme Ltd", "status": "connected"},
            {"id": "beta", "name": "Beta Pty", "status": "expired"}
        ],
        "reports": [{
            "entityId": "acme",
            "reportDate": "2025-03-31",
            "balanceSheet": [{"rowType": "Section", "title": "Bank", "rows": [
                {"rowType": "Row", "cells": [{"value": "Cash"}, {"value": "10"}]}
            ]}]
        }],
        "journals": [{"entityId": "acme", "entries": [
            {"id": "j1", "date": "2025-03-01", "status": "POSTED", "lines": []},
            {"id": "j2", "date": "2025-04-01", "status": "POSTED", "lines": []}
        ]}]
    }"#;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_loads_entities_and_reports() {
        let source = DatasetSource::from_json(DATASET).unwrap();

        let entities = source.entities().await.unwrap();
        assert_eq!(entities.len(), 2);
        assert_eq!(entities[1].status, ConnectionStatus::Expired);

        let bs = source
            .balance_sheet(&EntityId::new("acme"), date(3, 31))
            .await
            .unwrap();
        assert_eq!(bs.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_report_is_unavailable() {
        let source = DatasetSource::from_json(DATASET).unwrap();
        let err = source
            .profit_and_loss(&EntityId::new("acme"), date(3, 31))
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::Unavailable { .. }));

        let err = source
            .balance_sheet(&EntityId::new("acme"), date(2, 28))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("2025-02-28"));
    }

    #[tokio::test]
    async fn test_journals_filtered_by_date_range() {
        let source = DatasetSource::from_json(DATASET).unwrap();
        let query = JournalQuery {
            date_from: date(3, 1),
            date_to: date(3, 31),
            account_name: None,
        };
        let entries = source
            .manual_journals(&EntityId::new("acme"), &query)
            .await
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id.as_str(), "j1");
    }
}
