//! The closed set of API actions a strategy can apply to entities.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// An operation applied to every entity in a push.
///
/// The set is closed and shared by all strategies. Strategies declare which
/// subset they support (`Post` and `Sync` by default); the remaining
/// variants exist for providers whose endpoints expose them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiAction {
    /// Create the entity remotely. A successful post assigns the remote id.
    Post,
    /// Fetch the entity's remote state back into local state.
    Sync,
    /// Delete the entity remotely.
    Delete,
    /// Replace the entity remotely.
    Update,
    /// Partially update the entity remotely.
    Patch,
}

impl ApiAction {
    /// The lowercase wire/name form of the action.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ApiAction::Post => "post",
            ApiAction::Sync => "sync",
            ApiAction::Delete => "delete",
            ApiAction::Update => "update",
            ApiAction::Patch => "patch",
        }
    }
}

impl fmt::Display for ApiAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown action name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown action: {0}")]
pub struct ParseActionError(pub String);

impl FromStr for ApiAction {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "post" => Ok(ApiAction::Post),
            "sync" => Ok(ApiAction::Sync),
            "delete" => Ok(ApiAction::Delete),
            "update" => Ok(ApiAction::Update),
            "patch" => Ok(ApiAction::Patch),
            other => Err(ParseActionError(other.to_string())),
        }
    }
}
