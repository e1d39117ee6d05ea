//! Period-over-period comparison of trial balances.

pub mod service;
pub mod types;

pub use service::{BalanceSnapshot, PeriodComparator, SnapshotLine};
pub use types::{ChangeType, PeriodChange, PeriodComparison};
