//! A computer chess opponent with selectable difficulty.
//!
//! Chess rules come from a [`PositionOracle`]; this crate only decides which of the
//! oracle's legal moves the computer plays:
//!
//! - easy: a uniformly random legal move
//! - medium: the most valuable capture, or a random move when nothing can be taken
//! - hard: two-ply minimax on material balance
//!
//! [`Game`] sequences a human-vs-computer game on top of that.

pub mod config;
pub mod engine;
pub mod error;
pub mod game;
pub mod logging;
pub mod oracle;
pub mod types;
pub mod util;

pub use config::Settings;
pub use engine::{Opponent, eval::evaluate, select_move};
pub use error::{ConfigError, GameError, OracleError, ParseError, SelectError};
pub use game::{Game, GameStatus};
pub use oracle::{PositionOracle, ScopedMove, ShakmatyOracle};
pub use types::{BoardSnapshot, Difficulty, Move, Piece, PieceKind, Side, Square};
