use std::str::FromStr;

use log::trace;
use shakmaty::{
    CastlingMode, Chess, Color, EnPassantMode, Position, Role,
    fen::Fen,
    uci::UciMove,
    zobrist::{Zobrist64, ZobristHash},
};

use super::PositionOracle;
use crate::{
    error::OracleError,
    types::{BoardSnapshot, Move, Piece, PieceKind, Side, Square},
};

/// [`PositionOracle`] backed by `shakmaty`.
///
/// `shakmaty` positions are immutable snapshots, so undo is a stack of the positions
/// that preceded each applied move.
#[derive(Debug, Clone, Default)]
pub struct ShakmatyOracle {
    game: Chess,
    history: Vec<Chess>,
}

impl ShakmatyOracle {
    pub fn new() -> ShakmatyOracle {
        ShakmatyOracle::default()
    }

    pub fn from_position(game: Chess) -> ShakmatyOracle {
        ShakmatyOracle {
            game,
            history: Vec::new(),
        }
    }

    pub fn from_fen(fen: &str) -> Result<ShakmatyOracle, OracleError> {
        let game = Fen::from_str(fen.trim())
            .map_err(|e| OracleError::InvalidPosition(e.to_string()))?
            .into_position(CastlingMode::Standard)
            .map_err(|e| OracleError::InvalidPosition(e.to_string()))?;
        Ok(ShakmatyOracle::from_position(game))
    }

    /// Number of applied moves that can still be undone.
    pub fn depth(&self) -> usize {
        self.history.len()
    }

    /// Fifty moves by each side without a capture or pawn move.
    fn is_fifty_move_draw(&self) -> bool {
        self.game.halfmoves() >= 100
    }

    /// The current position has occurred twice before with the same side to move,
    /// castling rights and en passant square.
    fn is_threefold_repetition(&self) -> bool {
        let current: Zobrist64 = self.game.zobrist_hash(EnPassantMode::Legal);
        let earlier = self
            .history
            .iter()
            .filter(|pos| pos.zobrist_hash::<Zobrist64>(EnPassantMode::Legal) == current)
            .count();
        earlier >= 2
    }

    /// Finds the engine move matching `mv`. A missing promotion piece means a queen.
    fn resolve(&self, mv: &Move) -> Option<shakmaty::Move> {
        self.game.legal_moves().into_iter().find(|candidate| {
            to_move(candidate).is_some_and(|c| {
                c.from() == mv.from()
                    && c.to() == mv.to()
                    && c.promotion()
                        == mv
                            .promotion()
                            .or(c.promotion().map(|_| PieceKind::Queen))
            })
        })
    }
}

impl PositionOracle for ShakmatyOracle {
    fn legal_moves(&self, side: Side, from: Option<Square>) -> Vec<Move> {
        if to_side(self.game.turn()) != side {
            return Vec::new();
        }
        self.game
            .legal_moves()
            .iter()
            .filter_map(to_move)
            .filter(|mv| from.is_none_or(|sq| mv.from() == sq))
            .collect()
    }

    fn apply_move(&mut self, mv: &Move) -> Result<(), OracleError> {
        let Some(engine_move) = self.resolve(mv) else {
            return Err(OracleError::IllegalMove(*mv));
        };
        trace!("apply {mv} at depth {}", self.history.len());
        self.history.push(self.game.clone());
        self.game.play_unchecked(engine_move);
        Ok(())
    }

    fn undo_last_move(&mut self) -> Result<(), OracleError> {
        self.game = self.history.pop().ok_or(OracleError::NothingToUndo)?;
        Ok(())
    }

    fn is_game_over(&self) -> bool {
        self.game.is_game_over() || self.is_fifty_move_draw() || self.is_threefold_repetition()
    }

    fn is_checkmate(&self) -> bool {
        self.game.is_checkmate()
    }

    fn side_to_move(&self) -> Side {
        to_side(self.game.turn())
    }

    fn board_snapshot(&self) -> BoardSnapshot {
        let mut snapshot = BoardSnapshot::empty();
        for (sq, piece) in self.game.board().iter() {
            snapshot.set(
                from_engine_square(sq),
                Some(Piece::new(to_side(piece.color), to_kind(piece.role))),
            );
        }
        snapshot
    }
}

fn to_side(color: Color) -> Side {
    match color {
        Color::White => Side::White,
        Color::Black => Side::Black,
    }
}

fn to_kind(role: Role) -> PieceKind {
    match role {
        Role::Pawn => PieceKind::Pawn,
        Role::Knight => PieceKind::Knight,
        Role::Bishop => PieceKind::Bishop,
        Role::Rook => PieceKind::Rook,
        Role::Queen => PieceKind::Queen,
        Role::King => PieceKind::King,
    }
}

/// shakmaty squares count from a1 = 0 upwards; rows here count down from rank 8.
fn from_engine_square(sq: shakmaty::Square) -> Square {
    let index = sq as u8;
    Square::new(7 - index / 8, index % 8).unwrap_or_else(|| unreachable!("square index {index}"))
}

/// Castling goes through UCI so it reads as the king's two-square move.
fn to_move(engine_move: &shakmaty::Move) -> Option<Move> {
    match engine_move.to_uci(CastlingMode::Standard) {
        UciMove::Normal {
            from,
            to,
            promotion,
        } => Some(Move::new(
            from_engine_square(from),
            from_engine_square(to),
            promotion.map(to_kind),
            engine_move.capture().map(to_kind),
        )),
        _ => None,
    }
}
