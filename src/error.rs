use thiserror::Error;

use crate::board::Spot;
use crate::mode::Phase;

/// Reasons an action is refused. A refused action leaves the session
/// exactly as it was; the message is meant to be shown transiently.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("the game is over")]
    GameOver,

    #[error("not allowed during the {0} phase")]
    WrongPhase(Phase),

    #[error("spot {0} is empty")]
    EmptySpot(Spot),

    #[error("a red piece cannot be the opening removal in solo play")]
    RedOpeningInSolo,

    #[error("no legal jump from spot {start} to spot {end}")]
    IllegalMove { start: Spot, end: Spot },

    #[error("waiting for the CPU to move")]
    CpuTurn,

    #[error("it is not the CPU's turn")]
    NotCpuTurn,

    #[error("replay in progress")]
    ReplayActive,

    #[error("no replay in progress")]
    NotReplaying,

    #[error("nothing to replay yet")]
    NoHistory,

    #[error("tutorial expects spot {expected}")]
    OffScript { expected: Spot },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

/// Errors from the text formats (board layouts, mode names).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected 15 spots, found {0}")]
    SpotCount(usize),

    #[error("unknown piece symbol '{0}'")]
    Symbol(char),

    #[error("unknown game mode: {0}")]
    Mode(String),
}
