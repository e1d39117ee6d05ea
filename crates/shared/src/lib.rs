//! Shared types, errors, and configuration for Ledgerlens.
//!
//! This crate provides common types used across all other crates:
//! - Typed identifiers for entities and journals
//! - Lenient amount parsing and tolerance comparison
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{
    AppConfig, ComparisonConfig, ConsolidationConfig, LoggingConfig, ScreeningConfig,
};
pub use error::{AppError, AppResult};
