//! Unified error types surfaced by the runtime API.
//!
//! Wraps snapshot, content and dispatch failures so clients can bubble them
//! up with consistent context. A missing skill or target is never an error;
//! it is the normal trigger for the fallback behaviour.
use game_core::{ActorId, ErrorSeverity, GameError, SnapshotError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("level {0} is not part of the snapshot")]
    UnknownLevel(i32),

    #[error("monster {0} is not part of the snapshot")]
    UnknownMonster(ActorId),

    #[error("invalid snapshot")]
    Snapshot(#[source] SnapshotError),

    #[error("command sink closed")]
    SinkClosed,

    #[error("decision worker for level {level} panicked")]
    WorkerPanicked { level: i32 },

    #[error("failed to load content")]
    Content(#[source] anyhow::Error),
}

impl From<SnapshotError> for RuntimeError {
    fn from(err: SnapshotError) -> Self {
        match err {
            SnapshotError::UnknownLevel(level) => Self::UnknownLevel(level),
            other => Self::Snapshot(other),
        }
    }
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownLevel(_) | Self::UnknownMonster(_) | Self::Snapshot(_) => {
                ErrorSeverity::Validation
            }
            Self::SinkClosed | Self::Content(_) => ErrorSeverity::Recoverable,
            Self::WorkerPanicked { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownLevel(_) => "RUNTIME_UNKNOWN_LEVEL",
            Self::UnknownMonster(_) => "RUNTIME_UNKNOWN_MONSTER",
            Self::Snapshot(_) => "RUNTIME_INVALID_SNAPSHOT",
            Self::SinkClosed => "RUNTIME_SINK_CLOSED",
            Self::WorkerPanicked { .. } => "RUNTIME_WORKER_PANICKED",
            Self::Content(_) => "RUNTIME_CONTENT",
        }
    }
}
