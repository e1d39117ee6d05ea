//! Portfolio data types.

use chrono::NaiveDate;
use ledgerlens_shared::types::EntityId;
use serde::{Deserialize, Serialize};

use crate::trial_balance::{BalanceCheck, EntityTrialBalance, RowCounts, TrialBalanceTotals};

/// Consolidated totals and checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsolidatedView {
    /// Field-by-field sum of company totals.
    pub totals: TrialBalanceTotals,
    /// Balance checks over the summed totals.
    pub balance_check: BalanceCheck,
}

/// Data-quality flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataQuality {
    /// Every requested entity reported.
    pub all_connected: bool,
    /// Every reporting entity balances.
    pub all_balanced: bool,
    /// The consolidated totals balance.
    pub consolidated_balanced: bool,
}

/// Portfolio summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    /// Companies that reported.
    pub total_companies: usize,
    /// Companies requested.
    pub requested_companies: usize,
    /// Accounts across all companies.
    pub total_accounts: usize,
    /// Companies whose debits equal credits.
    pub balanced_companies: usize,
    /// Row counters summed across companies.
    pub row_counts: RowCounts,
    /// Data-quality flags.
    pub data_quality: DataQuality,
}

/// A requested entity that did not make it into the portfolio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingEntity {
    /// Entity identifier.
    pub entity_id: EntityId,
    /// Entity display name.
    pub entity_name: String,
    /// Error code of the failure.
    pub error_code: String,
    /// Failure detail.
    pub reason: String,
}

/// Consolidated trial balance across entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioTrialBalance {
    /// Report date shared by every company.
    pub report_date: NaiveDate,
    /// Per-company trial balances with full drill-down, in request order.
    pub companies: Vec<EntityTrialBalance>,
    /// Consolidated view.
    pub consolidated: ConsolidatedView,
    /// Summary and data quality.
    pub summary: PortfolioSummary,
    /// Requested entities that failed, in request order.
    pub missing_entities: Vec<MissingEntity>,
}
