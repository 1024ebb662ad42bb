//! Engine error taxonomy
//!
//! Quitting is not an error: it travels as a `TickOutcome`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// A collaborator the loop depends on went away (terminal, input device, sprite).
    #[error("{resource} unavailable: {reason}")]
    ResourceUnavailable {
        resource: &'static str,
        reason: String,
    },
    /// The pending-obstacle marker referenced an entity that no longer exists.
    #[error("spawn marker references removed obstacle {0}")]
    InvalidSpawnState(u32),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("malformed settings: {0}")]
    Settings(#[from] serde_json::Error),
}

impl EngineError {
    pub fn unavailable(resource: &'static str, reason: impl Into<String>) -> Self {
        Self::ResourceUnavailable {
            resource,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
