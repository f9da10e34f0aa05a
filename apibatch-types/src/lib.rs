//! Shared type definitions for the apibatch push engine.
//!
//! Kept dependency-light so both the engine and entity implementations can
//! depend on it without pulling in the async runtime.

mod action;
mod error;

pub use action::{ApiAction, ParseActionError};
pub use error::EntityError;
