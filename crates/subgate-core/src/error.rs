//! Error types for subgate operations.
//!
//! The gate treats a missing identity as a terminal state, not an error.
//! `IdentityAbsent` is what a caller gets when it acts on such a session.

use thiserror::Error;

use crate::types::ViewKey;

/// Result type for subgate operations.
pub type Result<T> = std::result::Result<T, SubgateError>;

/// Errors that can occur while gating or loading content.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubgateError {
    /// The host did not provide a user id.
    #[error("No user identity provided by the host")]
    IdentityAbsent,

    /// The validation call itself failed. Distinct from a denied decision.
    #[error("Subscription validation failed: {0}")]
    ValidationFailure(String),

    /// One view's content could not be loaded.
    #[error("Failed to load {view}: {reason}")]
    ContentLoadFailure { view: ViewKey, reason: String },

    /// Navigation or task actions attempted before access was granted.
    #[error("Access has not been granted")]
    NotGranted,

    /// A retry was requested outside the failed state.
    #[error("Nothing to retry: gating did not fail")]
    NothingToRetry,

    #[error("Unknown view: {0}")]
    UnknownView(String),

    #[error("Config error: {0}")]
    Config(String),
}

// Convenience constructors
impl SubgateError {
    pub fn validation(reason: impl Into<String>) -> Self {
        SubgateError::ValidationFailure(reason.into())
    }

    pub fn content(view: ViewKey, reason: impl Into<String>) -> Self {
        SubgateError::ContentLoadFailure {
            view,
            reason: reason.into(),
        }
    }
}
