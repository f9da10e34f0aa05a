//! Error types for the push engine.

use apibatch_types::ApiAction;
use thiserror::Error;

/// Result type for push operations.
pub type PushResult<T> = Result<T, PushError>;

/// Errors that abort a whole `execute` or `push` call before any entity is
/// touched. Per-entity action failures are never reported here; they live in
/// each entity's [`ActionOutcome`](crate::ActionOutcome).
#[derive(Debug, Error)]
pub enum PushError {
    /// The action is not in the strategy's supported set.
    #[error("invalid action: {0}")]
    InvalidAction(ApiAction),

    /// `execute` was called with no entities.
    #[error("no entities to process")]
    EmptyInput,

    /// `push` was called on an empty queue.
    #[error("no entity in the queue")]
    EmptyQueue,

    /// The strategy has no implementation for this provider (batch mode
    /// requires a provider-specific strategy).
    #[error("batch mode is not implemented for this provider")]
    NotImplemented,
}
