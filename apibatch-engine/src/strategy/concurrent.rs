//! Concurrent strategy: one worker task per entity.

use super::PushStrategy;
use crate::entity::{apply_one, SharedEntity};
use crate::error::PushResult;
use crate::outcome::{ActionError, ActionOutcome};
use apibatch_types::ApiAction;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::{Id, JoinSet};
use tracing::{error, info};

/// Default bound on in-flight entity actions.
pub const DEFAULT_MAX_WORKERS: usize = 64;

/// Fans the action out across one spawned task per entity and joins them
/// all, collecting one outcome per entity.
///
/// Most entity work is network I/O, so concurrent dispatch is expected to
/// beat [`SequentialStrategy`](super::SequentialStrategy) as the batch
/// grows. Outcomes are returned in completion order, which is
/// nondeterministic — callers must not rely on it matching input order.
///
/// One worker's failure or panic never cancels its siblings; the join
/// barrier waits for every worker. No timeout is enforced at this layer, so
/// an entity action that hangs blocks the whole batch.
///
/// In-flight work is capped by a semaphore of `max_workers` permits
/// (batches smaller than the cap run fully in parallel). Use
/// [`ConcurrentStrategy::unbounded`] to spawn strictly one worker per
/// entity with no cap.
#[derive(Debug, Clone, Copy)]
pub struct ConcurrentStrategy {
    max_workers: Option<usize>,
}

impl Default for ConcurrentStrategy {
    fn default() -> Self {
        Self {
            max_workers: Some(DEFAULT_MAX_WORKERS),
        }
    }
}

impl ConcurrentStrategy {
    /// Creates a strategy with the default worker cap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a strategy capping in-flight actions at `max_workers`
    /// (minimum 1).
    pub fn bounded(max_workers: usize) -> Self {
        Self {
            max_workers: Some(max_workers.max(1)),
        }
    }

    /// Creates a strategy with no cap: one live worker per entity.
    pub fn unbounded() -> Self {
        Self { max_workers: None }
    }

    /// The configured cap, if any.
    pub fn max_workers(&self) -> Option<usize> {
        self.max_workers
    }
}

#[async_trait]
impl PushStrategy for ConcurrentStrategy {
    fn name(&self) -> &'static str {
        "concurrent"
    }

    async fn execute(
        &self,
        action: ApiAction,
        entities: &[SharedEntity],
    ) -> PushResult<Vec<ActionOutcome>> {
        self.validate(action, entities)?;

        let semaphore = self.max_workers.map(|n| Arc::new(Semaphore::new(n)));
        let mut workers = JoinSet::new();
        // Task id -> entity, so a panicked worker can still be attributed
        // to its entity when the join handle carries no payload.
        let mut by_task: HashMap<Id, SharedEntity> = HashMap::with_capacity(entities.len());

        for entity in entities {
            let entity = entity.clone();
            let semaphore = semaphore.clone();
            let worker = {
                let entity = entity.clone();
                async move {
                    // Held until the worker finishes. The semaphore is never
                    // closed, so acquire only fails if it were.
                    let _permit = match semaphore {
                        Some(s) => s.acquire_owned().await.ok(),
                        None => None,
                    };
                    apply_one(&entity, action).await
                }
            };
            let handle = workers.spawn(worker);
            by_task.insert(handle.id(), entity);
        }

        // Join all workers; individual failures never cancel siblings.
        let mut outcomes = Vec::with_capacity(by_task.len());
        while let Some(joined) = workers.join_next_with_id().await {
            match joined {
                Ok((id, (label, result))) => {
                    let Some(entity) = by_task.remove(&id) else {
                        continue;
                    };
                    let outcome = match result {
                        Ok(()) => {
                            info!(entity = %label, %action, "entity action ok");
                            ActionOutcome::success(entity, label)
                        }
                        Err(e) => {
                            error!(entity = %label, %action, error = %e, "entity action failed");
                            ActionOutcome::failure(entity, label, e)
                        }
                    };
                    outcomes.push(outcome);
                }
                Err(join_err) => {
                    let Some(entity) = by_task.remove(&join_err.id()) else {
                        error!(%action, error = %join_err, "worker failed for unknown entity");
                        continue;
                    };
                    // The worker died before reporting; the lock is free
                    // again, so the label can be read directly.
                    let label = entity.lock().await.label();
                    error!(entity = %label, %action, error = %join_err, "worker panicked");
                    outcomes.push(ActionOutcome::failure(
                        entity,
                        label,
                        ActionError::Panicked(join_err.to_string()),
                    ));
                }
            }
        }
        Ok(outcomes)
    }
}
