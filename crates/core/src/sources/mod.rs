//! External collaborator boundary.
//!
//! The pipeline never talks to the accounting system directly. It consumes
//! three narrow async traits: a report source, a journal source and an
//! entity registry. Transport, OAuth and token refresh live behind them.

pub mod dataset;
pub mod error;
pub mod types;

pub use dataset::DatasetSource;
pub use error::SourceError;
pub use types::{ConnectionStatus, Entity, JournalQuery};

use async_trait::async_trait;
use chrono::NaiveDate;
use ledgerlens_shared::types::EntityId;

use crate::journal::JournalEntry;
use crate::rows::ReportNode;

/// Supplies report row trees for one entity and date.
#[async_trait]
pub trait ReportSource: Send + Sync {
    /// Fetches the balance-sheet row tree.
    async fn balance_sheet(
        &self,
        entity_id: &EntityId,
        report_date: NaiveDate,
    ) -> Result<Vec<ReportNode>, SourceError>;

    /// Fetches the profit-and-loss row tree.
    async fn profit_and_loss(
        &self,
        entity_id: &EntityId,
        report_date: NaiveDate,
    ) -> Result<Vec<ReportNode>, SourceError>;
}

/// Supplies manual journal entries.
#[async_trait]
pub trait JournalSource: Send + Sync {
    /// Fetches manual journals for an entity within the query's date range.
    async fn manual_journals(
        &self,
        entity_id: &EntityId,
        query: &JournalQuery,
    ) -> Result<Vec<JournalEntry>, SourceError>;
}

/// Lists the entities eligible for consolidation.
#[async_trait]
pub trait EntityRegistry: Send + Sync {
    /// Returns every known entity with its connectivity status.
    async fn entities(&self) -> Result<Vec<Entity>, SourceError>;
}
