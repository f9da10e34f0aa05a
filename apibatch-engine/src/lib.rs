//! Strategy-driven push engine for remote API entities.
//!
//! Pushes a queue of independent entities (posts, ads, campaigns, ...) to a
//! remote API and syncs their state back, using an interchangeable
//! execution strategy:
//! - **Sequential** — one entity at a time, in queue order
//! - **Concurrent** — one worker task per entity, bounded fan-out
//! - **Batch** — one bulk call, for providers that support it
//!
//! # Architecture
//!
//! - **Entity contract** ([`ApiEntity`]): one async method per action; the
//!   entity performs its own network I/O and mutates only its own state
//! - **Strategy** ([`PushStrategy`]): applies one action to many entities,
//!   collecting one [`ActionOutcome`] per entity without aborting the batch
//!   on individual failures
//! - **Batcher** ([`ApiBatcher`]): buffers entities and drives the
//!   two-phase push — a full POST pass, then a full SYNC pass
//!
//! # Example
//!
//! ```
//! use apibatch_engine::entity::mock::MockEntity;
//! use apibatch_engine::{ApiBatcher, ConcurrentStrategy};
//! use std::sync::Arc;
//!
//! let mut batcher = ApiBatcher::with_strategy(Arc::new(ConcurrentStrategy::new()));
//! batcher.enqueue(MockEntity::new("ad-1"));
//! batcher.enqueue(MockEntity::new("ad-2"));
//! assert_eq!(batcher.len(), 2);
//! // batcher.push().await? runs POST across the queue, then SYNC.
//! ```

mod batcher;
mod config;
pub mod entity;
mod error;
pub mod http;
mod outcome;
pub mod persist;
mod strategy;

pub use batcher::{ApiBatcher, PushReport};
pub use config::{resolve_strategy, ParseModeError, PushMode};
pub use entity::{share, ApiEntity, SharedEntity};
pub use error::{PushError, PushResult};
pub use http::HttpPost;
pub use outcome::{ActionError, ActionOutcome};
pub use persist::EntityStore;
pub use strategy::{
    BatchStrategy, ConcurrentStrategy, PushStrategy, SequentialStrategy, DEFAULT_ACTIONS,
    DEFAULT_MAX_WORKERS,
};

pub use apibatch_types::{ApiAction, EntityError};
