//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// Only conditions that make a requested computation impossible end up here.
/// Partial failures (an entity that did not report, a malformed row) are
/// carried inside the result payloads instead.
#[derive(Debug, Error)]
pub enum AppError {
    /// Requested entity or resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid caller input (e.g. an unparseable report date).
    #[error("Validation error: {0}")]
    Validation(String),

    /// An upstream report or journal source failed.
    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),

    /// An upstream call did not finish in time.
    #[error("Timed out: {0}")]
    Timeout(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::SourceUnavailable(_) => 502,
            Self::Timeout(_) => 504,
            Self::Configuration(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::SourceUnavailable(_) => "SOURCE_UNAVAILABLE",
            Self::Timeout(_) => "TIMEOUT",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Validation(err.to_string())
    }
}
