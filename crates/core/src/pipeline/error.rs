//! Pipeline error types.

use ledgerlens_shared::AppError;
use thiserror::Error;

use crate::sources::SourceError;

/// Errors that stop a pipeline flow before any result is produced.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// No registered entity matches the requested id or name.
    #[error("No entity matches '{0}'")]
    NoMatchingEntity(String),

    /// The report date could not be parsed.
    #[error("Invalid report date '{0}', expected YYYY-MM-DD")]
    InvalidReportDate(String),

    /// A source call failed.
    #[error(transparent)]
    Source(#[from] SourceError),
}

impl PipelineError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NoMatchingEntity(_) => "ENTITY_NOT_FOUND",
            Self::InvalidReportDate(_) => "INVALID_REPORT_DATE",
            Self::Source(err) => err.error_code(),
        }
    }
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::NoMatchingEntity(_) => Self::NotFound(err.to_string()),
            PipelineError::InvalidReportDate(_) => Self::Validation(err.to_string()),
            PipelineError::Source(source) => source.into(),
        }
    }
}
