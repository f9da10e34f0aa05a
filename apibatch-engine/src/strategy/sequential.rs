//! Sequential strategy: one entity at a time, in queue order.

use super::PushStrategy;
use crate::entity::{apply_one, SharedEntity};
use crate::error::PushResult;
use crate::outcome::ActionOutcome;
use apibatch_types::ApiAction;
use async_trait::async_trait;
use tracing::debug;

/// Baseline strategy that loops over the entities one at a time.
///
/// Outcomes are returned in input order. A failing entity is recorded and
/// the loop moves on to the next one; it never halts the run.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialStrategy;

#[async_trait]
impl PushStrategy for SequentialStrategy {
    fn name(&self) -> &'static str {
        "sequential"
    }

    async fn execute(
        &self,
        action: ApiAction,
        entities: &[SharedEntity],
    ) -> PushResult<Vec<ActionOutcome>> {
        self.validate(action, entities)?;

        let mut outcomes = Vec::with_capacity(entities.len());
        for entity in entities {
            let (label, result) = apply_one(entity, action).await;
            let outcome = match result {
                Ok(()) => {
                    debug!(entity = %label, %action, "entity action ok");
                    ActionOutcome::success(entity.clone(), label)
                }
                Err(e) => {
                    debug!(entity = %label, %action, error = %e, "entity action failed");
                    ActionOutcome::failure(entity.clone(), label, e)
                }
            };
            outcomes.push(outcome);
        }
        Ok(outcomes)
    }
}
