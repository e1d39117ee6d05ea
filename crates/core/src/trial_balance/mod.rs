//! Entity trial balance construction.
//!
//! This module builds one entity's trial balance for one report date:
//! - Walks the balance-sheet and profit-and-loss row trees
//! - Classifies every row and buckets the accounts by type
//! - Accumulates debit/credit and per-type totals
//! - Evaluates the debits = credits and accounting equation checks

pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use service::{DEFAULT_BALANCE_TOLERANCE, TrialBalanceBuilder};
pub use types::*;
