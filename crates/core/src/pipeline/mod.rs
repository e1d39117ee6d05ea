//! End-to-end flows over a data source.
//!
//! Resolves entities and report dates, then drives the builders, the
//! consolidator, the screener and the comparator.

pub mod error;
pub mod service;

#[cfg(test)]
mod tests;

pub use error::PipelineError;
pub use service::{LedgerPipeline, connected_entities, resolve_entity, resolve_report_date};
