//! Errors an entity action can signal.

use crate::action::ApiAction;
use thiserror::Error;

/// Errors produced by an entity's own action methods.
///
/// These are always localized to one entity's outcome; they never abort
/// sibling entities in a batch.
#[derive(Debug, Error)]
pub enum EntityError {
    /// Transport-level failure (connection refused, DNS, timeout, ...).
    #[error("network error: {0}")]
    Network(String),

    /// The remote API accepted the request but rejected the entity.
    #[error("remote rejected ({status}): {message}")]
    Rejected {
        /// HTTP-style status code reported by the remote.
        status: u16,
        /// Remote error detail.
        message: String,
    },

    /// Payload serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The action requires a remote id the entity does not have yet
    /// (e.g. sync before a successful post).
    #[error("entity has no remote id")]
    MissingRemoteId,

    /// The entity does not implement this action.
    #[error("entity does not support action {0}")]
    UnsupportedAction(ApiAction),

    /// Any other entity-specific failure.
    #[error("{0}")]
    Other(String),
}
