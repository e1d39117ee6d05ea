//! Portfolio consolidation.
//!
//! Fetches every entity's trial balance concurrently (bounded, with per-fetch
//! timeouts and a call deadline), then sums the survivors into one portfolio
//! view. Entities that fail are reported, never fatal.

pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use service::{AMOUNT_OVERFLOW, Consolidator};
pub use types::{
    ConsolidatedView, DataQuality, MissingEntity, PortfolioSummary, PortfolioTrialBalance,
};
