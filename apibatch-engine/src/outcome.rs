//! Per-entity results of applying an action.

use crate::entity::SharedEntity;
use apibatch_types::EntityError;
use std::fmt;
use thiserror::Error;

/// Why a single entity's action did not complete.
#[derive(Debug, Error)]
pub enum ActionError {
    /// The entity's action method reported a failure.
    #[error(transparent)]
    Entity(#[from] EntityError),

    /// The worker running the action panicked.
    #[error("worker panicked: {0}")]
    Panicked(String),
}

/// The result of applying one action to one entity.
///
/// Outcomes carry the entity handle back to the caller (the entity may have
/// been mutated by its action, e.g. a remote id assigned by a post) plus a
/// label captured at dispatch time so reports can be read without locking.
pub struct ActionOutcome {
    /// Handle to the (possibly updated) entity.
    pub entity: SharedEntity,
    /// Label captured when the action was dispatched.
    pub label: String,
    /// Success, or why this entity failed. Never affects sibling entities.
    pub result: Result<(), ActionError>,
}

// The entity handle is a trait object with no Debug bound; print the
// captured label and the result instead.
impl fmt::Debug for ActionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionOutcome")
            .field("label", &self.label)
            .field("result", &self.result)
            .finish_non_exhaustive()
    }
}

impl ActionOutcome {
    /// Builds a success outcome.
    pub fn success(entity: SharedEntity, label: impl Into<String>) -> Self {
        Self {
            entity,
            label: label.into(),
            result: Ok(()),
        }
    }

    /// Builds a failure outcome.
    pub fn failure(
        entity: SharedEntity,
        label: impl Into<String>,
        error: impl Into<ActionError>,
    ) -> Self {
        Self {
            entity,
            label: label.into(),
            result: Err(error.into()),
        }
    }

    /// Whether the action completed normally.
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}
