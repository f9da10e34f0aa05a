//! Strategy selection.
//!
//! Selection is a pure function over two optional inputs: an explicitly
//! injected strategy and a mode string from whatever configuration source
//! the caller uses (typically an `API_MODE`-style environment variable,
//! read by the caller, not here). Injection wins; an absent or unrecognized
//! mode falls back to the concurrent strategy.

use crate::strategy::{BatchStrategy, ConcurrentStrategy, PushStrategy, SequentialStrategy};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::warn;

/// Recognized strategy modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PushMode {
    /// One entity at a time, in queue order.
    Sequential,
    /// One worker per entity.
    #[default]
    Concurrent,
    /// One bulk call, provider permitting.
    Batch,
}

impl PushMode {
    /// Builds the strategy this mode names.
    pub fn strategy(&self) -> Arc<dyn PushStrategy> {
        match self {
            PushMode::Sequential => Arc::new(SequentialStrategy),
            PushMode::Concurrent => Arc::new(ConcurrentStrategy::new()),
            PushMode::Batch => Arc::new(BatchStrategy),
        }
    }
}

impl fmt::Display for PushMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PushMode::Sequential => "sequential",
            PushMode::Concurrent => "concurrent",
            PushMode::Batch => "batch",
        };
        f.write_str(name)
    }
}

/// Error returned when parsing an unknown mode name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown push mode: {0}")]
pub struct ParseModeError(pub String);

impl FromStr for PushMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sequential" => Ok(PushMode::Sequential),
            "concurrent" => Ok(PushMode::Concurrent),
            "batch" => Ok(PushMode::Batch),
            other => Err(ParseModeError(other.to_string())),
        }
    }
}

/// Resolves the strategy to use, with injected-strategy precedence.
///
/// - `injected` set: use it, ignore `mode`.
/// - `mode` set and recognized: use the named strategy.
/// - otherwise (absent or unrecognized mode): concurrent.
pub fn resolve_strategy(
    injected: Option<Arc<dyn PushStrategy>>,
    mode: Option<&str>,
) -> Arc<dyn PushStrategy> {
    if let Some(strategy) = injected {
        return strategy;
    }
    let mode = match mode {
        Some(raw) => PushMode::from_str(raw).unwrap_or_else(|e| {
            warn!(error = %e, "falling back to concurrent strategy");
            PushMode::default()
        }),
        None => PushMode::default(),
    };
    mode.strategy()
}
