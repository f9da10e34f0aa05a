//! Execution strategies.
//!
//! A [`PushStrategy`] decides how one action is applied across many
//! entities. All strategies share the same contract, so callers can swap
//! execution policy without changing call sites.

mod batch;
mod concurrent;
mod sequential;

pub use batch::BatchStrategy;
pub use concurrent::{ConcurrentStrategy, DEFAULT_MAX_WORKERS};
pub use sequential::SequentialStrategy;

use crate::entity::SharedEntity;
use crate::error::{PushError, PushResult};
use crate::outcome::ActionOutcome;
use apibatch_types::ApiAction;
use async_trait::async_trait;

/// Actions every strategy supports unless it overrides
/// [`PushStrategy::supported_actions`].
pub const DEFAULT_ACTIONS: &[ApiAction] = &[ApiAction::Post, ApiAction::Sync];

/// A pluggable execution policy for applying one action to many entities.
#[async_trait]
pub trait PushStrategy: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// The actions this strategy will dispatch.
    fn supported_actions(&self) -> &[ApiAction] {
        DEFAULT_ACTIONS
    }

    /// Checks the shared preconditions. Every strategy calls this before
    /// touching any entity: the action must be supported and the input must
    /// be non-empty.
    fn validate(&self, action: ApiAction, entities: &[SharedEntity]) -> PushResult<()> {
        if !self.supported_actions().contains(&action) {
            return Err(PushError::InvalidAction(action));
        }
        if entities.is_empty() {
            return Err(PushError::EmptyInput);
        }
        Ok(())
    }

    /// Applies `action` to every entity, returning one outcome per entity.
    ///
    /// Precondition failures ([`PushError::InvalidAction`],
    /// [`PushError::EmptyInput`]) abort the whole call with no entity
    /// touched. A single entity's action failure never does: it is captured
    /// in that entity's outcome and the rest of the batch proceeds.
    async fn execute(
        &self,
        action: ApiAction,
        entities: &[SharedEntity],
    ) -> PushResult<Vec<ActionOutcome>>;
}
