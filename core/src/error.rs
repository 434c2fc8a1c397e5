use crate::types::{Millis, PlayerId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Negative elapsed time: last update {last_update} is after logical time {logical_time}")]
    NegativeElapsed { last_update: Millis, logical_time: Millis },

    #[error("Unknown building kind '{0}'")]
    UnknownBuilding(String),

    #[error("Unknown resource kind '{0}'")]
    UnknownResource(String),

    #[error("Player {0} not found")]
    UnknownPlayer(PlayerId),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TrackerError {
    /// True for caller bugs (bad timestamps, unknown kinds or players)
    /// as opposed to environment failures.
    pub fn is_precondition_violation(&self) -> bool {
        matches!(
            self,
            Self::NegativeElapsed { .. }
                | Self::UnknownBuilding(_)
                | Self::UnknownResource(_)
                | Self::UnknownPlayer(_)
        )
    }
}

pub type TrackerResult<T> = Result<T, TrackerError>;
