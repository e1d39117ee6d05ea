//! Collaborator data types.

use chrono::NaiveDate;
use ledgerlens_shared::types::EntityId;
use serde::{Deserialize, Serialize};

/// Connectivity of an entity to the upstream accounting system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    /// Authorized and reachable.
    Connected,
    /// Authorization expired and needs a refresh.
    Expired,
    /// Never connected or revoked.
    Disconnected,
}

/// A reporting legal entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    /// Entity identifier.
    pub id: EntityId,
    /// Display name.
    pub name: String,
    /// Connectivity status.
    pub status: ConnectionStatus,
}

impl Entity {
    /// Creates a connected entity.
    #[must_use]
    pub fn connected(id: impl Into<EntityId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status: ConnectionStatus::Connected,
        }
    }

    /// Returns true if the entity can be fetched.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.status == ConnectionStatus::Connected
    }
}

/// Parameters for a manual journal fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalQuery {
    /// First date included.
    pub date_from: NaiveDate,
    /// Last date included.
    pub date_to: NaiveDate,
    /// Optional account name fragment. Sources may pre-filter on it; the
    /// screener applies it regardless.
    pub account_name: Option<String>,
}

impl JournalQuery {
    /// Returns true if `date` lies inside the inclusive range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.date_from <= date && date <= self.date_to
    }
}
