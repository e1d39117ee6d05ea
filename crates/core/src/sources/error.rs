//! Collaborator error types.

use ledgerlens_shared::{AppError, types::EntityId};
use thiserror::Error;

/// Errors raised at the collaborator boundary.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The upstream system could not serve the request (network, auth, ...).
    #[error("Source unavailable for {entity_id}: {message}")]
    Unavailable {
        /// Entity the request was for.
        entity_id: EntityId,
        /// Upstream detail message.
        message: String,
    },

    /// The fetch did not complete before its timeout or the call deadline.
    #[error("Fetch for {entity_id} timed out after {timeout_ms}ms")]
    Timeout {
        /// Entity the request was for.
        entity_id: EntityId,
        /// Timeout that elapsed.
        timeout_ms: u64,
    },

    /// The entity registry itself failed.
    #[error("Entity registry unavailable: {0}")]
    Registry(String),
}

impl SourceError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unavailable { .. } | Self::Registry(_) => "SOURCE_UNAVAILABLE",
            Self::Timeout { .. } => "TIMEOUT",
        }
    }
}

impl From<SourceError> for AppError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Timeout { .. } => Self::Timeout(err.to_string()),
            SourceError::Unavailable { .. } | SourceError::Registry(_) => {
                Self::SourceUnavailable(err.to_string())
            }
        }
    }
}
