//! Persistence collaborator.
//!
//! The engine does not implement storage; after a push it hands each
//! entity to whatever [`EntityStore`] the caller configured.

use crate::entity::SharedEntity;
use apibatch_types::EntityError;
use async_trait::async_trait;

/// Durably stores an entity's state after processing.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Saves one entity. Failures are logged by the batcher, never fatal
    /// to the push.
    async fn save(&self, entity: &SharedEntity) -> Result<(), EntityError>;
}
