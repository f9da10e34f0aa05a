//! Queue + orchestrator driving the two-phase push.

use crate::config::resolve_strategy;
use crate::entity::{share, ApiEntity, SharedEntity};
use crate::error::{PushError, PushResult};
use crate::outcome::ActionOutcome;
use crate::persist::EntityStore;
use crate::strategy::PushStrategy;
use apibatch_types::ApiAction;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Outcomes of one two-phase push.
#[derive(Debug, Default)]
pub struct PushReport {
    /// Outcomes of the POST pass.
    pub post: Vec<ActionOutcome>,
    /// Outcomes of the SYNC pass.
    pub sync: Vec<ActionOutcome>,
}

impl PushReport {
    /// Whether every action in both passes succeeded.
    pub fn is_clean(&self) -> bool {
        self.failures().next().is_none()
    }

    /// All failed outcomes across both passes.
    pub fn failures(&self) -> impl Iterator<Item = &ActionOutcome> {
        self.post
            .iter()
            .chain(self.sync.iter())
            .filter(|o| !o.is_success())
    }

    /// Labels of entities that failed in either pass.
    pub fn failed_labels(&self) -> Vec<&str> {
        self.failures().map(|o| o.label.as_str()).collect()
    }
}

/// Buffers entities and pushes them to the API through a strategy.
///
/// ```
/// use apibatch_engine::entity::mock::MockEntity;
/// use apibatch_engine::{ApiBatcher, SequentialStrategy};
/// use std::sync::Arc;
///
/// let mut batcher = ApiBatcher::with_strategy(Arc::new(SequentialStrategy));
/// batcher.enqueue(MockEntity::new("post-1"));
/// batcher.enqueue(MockEntity::new("post-2"));
/// assert_eq!(batcher.len(), 2);
/// ```
///
/// The strategy is chosen once at construction: explicit injection takes
/// precedence over a mode string, and the default is concurrent (see
/// [`resolve_strategy`]).
pub struct ApiBatcher {
    /// Entities waiting to be processed.
    queue: Vec<SharedEntity>,
    /// Execution policy for both passes.
    strategy: Arc<dyn PushStrategy>,
    /// Optional persistence collaborator invoked after a push.
    store: Option<Arc<dyn EntityStore>>,
}

impl Default for ApiBatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiBatcher {
    /// Creates a batcher with the default (concurrent) strategy.
    pub fn new() -> Self {
        Self::from_mode(None)
    }

    /// Creates a batcher with an injected strategy.
    pub fn with_strategy(strategy: Arc<dyn PushStrategy>) -> Self {
        Self {
            queue: Vec::new(),
            strategy,
            store: None,
        }
    }

    /// Creates a batcher from an optional mode string (e.g. the value of an
    /// `API_MODE` environment variable, read by the caller). Unrecognized
    /// or absent modes mean concurrent.
    pub fn from_mode(mode: Option<&str>) -> Self {
        Self::with_strategy(resolve_strategy(None, mode))
    }

    /// Attaches a persistence collaborator; each queued entity is handed to
    /// it after both push passes complete.
    pub fn with_store(mut self, store: Arc<dyn EntityStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// The name of the active strategy.
    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Queues up an entity for processing.
    pub fn enqueue<E: ApiEntity + 'static>(&mut self, entity: E) {
        self.enqueue_shared(share(entity));
    }

    /// Queues up an already-shared entity handle.
    ///
    /// Enqueuing the same handle twice is not supported for concurrent
    /// processing; see [`SharedEntity`].
    pub fn enqueue_shared(&mut self, entity: SharedEntity) {
        self.queue.push(entity);
    }

    /// Number of queued entities.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Drops all queued entities. `push` never clears the queue itself.
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    /// Pushes all queued entities to the API, then syncs them back.
    ///
    /// Two full passes: the strategy executes POST across the whole queue,
    /// and only after every entity's POST has completed does the SYNC pass
    /// begin. Entities whose POST failed are not filtered out of the SYNC
    /// pass; their sync typically fails with a missing remote id and shows
    /// up as a failure in the report.
    ///
    /// The queue is left intact so a caller can inspect it or retry; use
    /// [`ApiBatcher::clear`] to drain it.
    ///
    /// # Errors
    ///
    /// [`PushError::EmptyQueue`] if nothing is queued (checked before any
    /// strategy call), plus any precondition error from the strategy.
    pub async fn push(&mut self) -> PushResult<PushReport> {
        if self.queue.is_empty() {
            return Err(PushError::EmptyQueue);
        }

        info!(
            strategy = self.strategy.name(),
            entities = self.queue.len(),
            "pushing queue"
        );
        let post = self.strategy.execute(ApiAction::Post, &self.queue).await?;
        let sync = self.strategy.execute(ApiAction::Sync, &self.queue).await?;
        let report = PushReport { post, sync };

        if let Some(store) = &self.store {
            for entity in &self.queue {
                if let Err(e) = store.save(entity).await {
                    let label = entity.lock().await.label();
                    warn!(entity = %label, error = %e, "failed to persist entity");
                }
            }
        }

        debug!(
            failed = report.failures().count(),
            total = self.queue.len() * 2,
            "push finished"
        );
        Ok(report)
    }
}
