//! Batch strategy: one bulk call for the whole queue, provider permitting.

use super::PushStrategy;
use crate::entity::SharedEntity;
use crate::error::{PushError, PushResult};
use crate::outcome::ActionOutcome;
use apibatch_types::ApiAction;
use async_trait::async_trait;

/// Placeholder for providers that expose a native bulk endpoint (e.g. the
/// Facebook Marketing API batch requests).
///
/// Bulk semantics are provider-specific, so this strategy validates its
/// input and then fails with [`PushError::NotImplemented`] without touching
/// any entity. Implementers targeting a bulk-capable API supply their own
/// [`PushStrategy`] with the same contract.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchStrategy;

#[async_trait]
impl PushStrategy for BatchStrategy {
    fn name(&self) -> &'static str {
        "batch"
    }

    async fn execute(
        &self,
        action: ApiAction,
        entities: &[SharedEntity],
    ) -> PushResult<Vec<ActionOutcome>> {
        self.validate(action, entities)?;
        Err(PushError::NotImplemented)
    }
}
