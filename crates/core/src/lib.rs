//! Core analysis logic for Ledgerlens.
//!
//! This crate turns accounting report row trees and manual journals into
//! trial balances, portfolio consolidations, anomaly screens and period
//! comparisons. It never talks to the accounting system directly; data
//! arrives through the traits in [`sources`].
//!
//! # Modules
//!
//! - `rows` - Report row tree model and traversal
//! - `classifier` - Row to account classification
//! - `trial_balance` - Per-entity trial balance construction
//! - `consolidation` - Concurrent multi-entity consolidation
//! - `journal` - Manual journal anomaly screening
//! - `comparison` - Period-over-period balance comparison
//! - `sources` - Collaborator traits and the dataset source
//! - `pipeline` - End-to-end flows over a source

pub mod classifier;
pub mod comparison;
pub mod consolidation;
pub mod journal;
pub mod pipeline;
pub mod rows;
pub mod sources;
pub mod trial_balance;
