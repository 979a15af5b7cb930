//! Error types for the opponent library.

use thiserror::Error;

use crate::types::{Move, Side, Square};

/// Text that could not be read as one of the board value types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid square: {0:?}")]
    Square(String),

    #[error("invalid side: {0:?} (expected white or black)")]
    Side(String),

    #[error("invalid difficulty: {0:?} (expected easy, medium or hard)")]
    Difficulty(String),

    #[error("invalid move: {0:?}")]
    Move(String),
}

/// Failures reported by a position oracle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    /// The move is not legal in the current position
    #[error("illegal move {0} in the current position")]
    IllegalMove(Move),

    /// Undo requested with no applied move on the history stack
    #[error("no move left to undo")]
    NothingToUndo,

    #[error("invalid starting position: {0}")]
    InvalidPosition(String),
}

/// Failures of the move selector.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectError {
    /// The caller asked for a move with an empty legal-move set
    #[error("move selection requires at least one legal move")]
    NoLegalMoves,

    /// The oracle did not return to the position it had before the search
    #[error("oracle position after the search differs from the position before it")]
    OracleDesync,

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

/// Failures of the game controller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("the game is already over")]
    GameOver,

    #[error("it is {0}'s turn")]
    NotYourTurn(Side),

    #[error("{from}{to} is not a legal move")]
    IllegalMove { from: Square, to: Square },

    #[error(transparent)]
    Select(#[from] SelectError),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

/// Failures while loading settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse settings file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}
