//! Entity capability contract.
//!
//! Every item queued for a push implements [`ApiEntity`]: one async method
//! per supported action, performing the entity's own network I/O and
//! mutating only the entity's own state. The engine dispatches through the
//! [`ApiEntity::apply`] capability table, never by name.

use apibatch_types::{ApiAction, EntityError};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Handle to an enqueued entity.
///
/// The batcher's queue owns entities exclusively; a worker locks the handle
/// for the duration of its own action, so concurrent workers never share
/// entity state. Enqueuing the same handle twice into one push is not
/// supported: the duplicate workers would serialize on the lock and the
/// entity would see double action calls.
pub type SharedEntity = Arc<Mutex<dyn ApiEntity>>;

/// Wraps an entity into a [`SharedEntity`] handle.
pub fn share<E: ApiEntity + 'static>(entity: E) -> SharedEntity {
    Arc::new(Mutex::new(entity))
}

/// An entity that can be pushed to a remote API.
///
/// Actions either complete normally or signal an [`EntityError`]; either way
/// they touch only this entity's state (e.g. `post` assigns the remote id
/// on success).
#[async_trait]
pub trait ApiEntity: Send {
    /// Short human-readable label used in logs and outcomes.
    fn label(&self) -> String;

    /// Creates the entity remotely (POST). Assigns the remote id on success.
    async fn post(&mut self) -> Result<(), EntityError>;

    /// Fetches the entity's remote state back (GET).
    async fn sync(&mut self) -> Result<(), EntityError>;

    /// Capability table mapping each action to its method.
    ///
    /// Actions beyond post/sync are unsupported unless an implementation
    /// overrides this.
    async fn apply(&mut self, action: ApiAction) -> Result<(), EntityError> {
        match action {
            ApiAction::Post => self.post().await,
            ApiAction::Sync => self.sync().await,
            other => Err(EntityError::UnsupportedAction(other)),
        }
    }
}

/// Runs one action against one entity, returning the captured label along
/// with the result. Shared by all strategies so locking discipline lives in
/// one place.
pub(crate) async fn apply_one(
    entity: &SharedEntity,
    action: ApiAction,
) -> (String, Result<(), EntityError>) {
    let mut guard = entity.lock().await;
    let label = guard.label();
    let result = guard.apply(action).await;
    (label, result)
}

/// A mock entity for testing.
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex as StdMutex;
    use std::time::Duration;

    /// Scripted behavior for a mock action.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum Behavior {
        /// Complete normally.
        #[default]
        Succeed,
        /// Return an [`EntityError::Other`].
        Fail,
        /// Panic inside the action.
        Panic,
    }

    /// Counters observable after the entity has been moved into the queue.
    #[derive(Debug, Clone, Default)]
    pub struct CallCounters {
        posts: Arc<AtomicUsize>,
        syncs: Arc<AtomicUsize>,
    }

    impl CallCounters {
        /// Number of completed `post` dispatches.
        pub fn posts(&self) -> usize {
            self.posts.load(Ordering::SeqCst)
        }

        /// Number of completed `sync` dispatches.
        pub fn syncs(&self) -> usize {
            self.syncs.load(Ordering::SeqCst)
        }
    }

    /// Shared append-only log of `"<action>:<label>"` dispatch records,
    /// useful for asserting cross-entity ordering.
    pub type Journal = Arc<StdMutex<Vec<String>>>;

    /// Creates an empty journal.
    pub fn journal() -> Journal {
        Arc::new(StdMutex::new(Vec::new()))
    }

    /// A scriptable in-memory entity.
    #[derive(Debug, Default)]
    pub struct MockEntity {
        name: String,
        on_post: Behavior,
        on_sync: Behavior,
        delay: Option<Duration>,
        counters: CallCounters,
        journal: Option<Journal>,
        remote_id: Option<u64>,
    }

    impl MockEntity {
        /// Creates a mock entity that succeeds at everything.
        pub fn new(name: impl Into<String>) -> Self {
            Self {
                name: name.into(),
                ..Default::default()
            }
        }

        /// Scripts the `post` action.
        pub fn on_post(mut self, behavior: Behavior) -> Self {
            self.on_post = behavior;
            self
        }

        /// Scripts the `sync` action.
        pub fn on_sync(mut self, behavior: Behavior) -> Self {
            self.on_sync = behavior;
            self
        }

        /// Adds an artificial delay to every action.
        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        /// Records every dispatch into the given journal.
        pub fn with_journal(mut self, journal: Journal) -> Self {
            self.journal = Some(journal);
            self
        }

        /// Clones out the counter handles; call before enqueuing.
        pub fn counters(&self) -> CallCounters {
            self.counters.clone()
        }

        /// The remote id assigned by a successful post.
        pub fn remote_id(&self) -> Option<u64> {
            self.remote_id
        }

        async fn run(&mut self, action: ApiAction, behavior: Behavior) -> Result<(), EntityError> {
            if let Some(journal) = &self.journal {
                journal
                    .lock()
                    .expect("journal lock")
                    .push(format!("{action}:{}", self.name));
            }
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            match behavior {
                Behavior::Succeed => Ok(()),
                Behavior::Fail => Err(EntityError::Other(format!(
                    "{} refused to {action}",
                    self.name
                ))),
                Behavior::Panic => panic!("{} panicked during {action}", self.name),
            }
        }
    }

    #[async_trait]
    impl ApiEntity for MockEntity {
        fn label(&self) -> String {
            self.name.clone()
        }

        async fn post(&mut self) -> Result<(), EntityError> {
            self.counters.posts.fetch_add(1, Ordering::SeqCst);
            let result = self.run(ApiAction::Post, self.on_post).await;
            if result.is_ok() {
                self.remote_id = Some(1);
            }
            result
        }

        async fn sync(&mut self) -> Result<(), EntityError> {
            self.counters.syncs.fetch_add(1, Ordering::SeqCst);
            self.run(ApiAction::Sync, self.on_sync).await
        }
    }
}
