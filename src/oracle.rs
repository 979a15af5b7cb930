mod shakmaty_oracle;

use std::ops::{Deref, DerefMut};

use log::error;

pub use shakmaty_oracle::ShakmatyOracle;

use crate::{
    error::OracleError,
    types::{BoardSnapshot, Move, Side, Square},
};

/// The rules engine the opponent plays against.
///
/// Legality, terminal detection and move application all live behind this trait;
/// the move selector only enumerates, applies and undoes what the oracle reports.
pub trait PositionOracle {
    /// Legal moves for `side`, optionally restricted to those starting on `from`.
    /// Empty when `side` is not the side to move.
    fn legal_moves(&self, side: Side, from: Option<Square>) -> Vec<Move>;

    fn apply_move(&mut self, mv: &Move) -> Result<(), OracleError>;

    fn undo_last_move(&mut self) -> Result<(), OracleError>;

    fn is_game_over(&self) -> bool;

    fn is_checkmate(&self) -> bool;

    fn side_to_move(&self) -> Side;

    fn board_snapshot(&self) -> BoardSnapshot;
}

/// A move applied for look-ahead only.
///
/// The move is taken back by [`ScopedMove::undo`], or on drop if the scope is left early.
pub struct ScopedMove<'a, O: PositionOracle + ?Sized> {
    oracle: &'a mut O,
    pending: bool,
}

impl<'a, O: PositionOracle + ?Sized> ScopedMove<'a, O> {
    pub fn apply(oracle: &'a mut O, mv: &Move) -> Result<Self, OracleError> {
        oracle.apply_move(mv)?;
        Ok(ScopedMove {
            oracle,
            pending: true,
        })
    }

    pub fn undo(mut self) -> Result<(), OracleError> {
        self.pending = false;
        self.oracle.undo_last_move()
    }
}

impl<O: PositionOracle + ?Sized> Deref for ScopedMove<'_, O> {
    type Target = O;

    fn deref(&self) -> &O {
        &*self.oracle
    }
}

impl<O: PositionOracle + ?Sized> DerefMut for ScopedMove<'_, O> {
    fn deref_mut(&mut self) -> &mut O {
        &mut *self.oracle
    }
}

impl<O: PositionOracle + ?Sized> Drop for ScopedMove<'_, O> {
    fn drop(&mut self) {
        if self.pending {
            if let Err(e) = self.oracle.undo_last_move() {
                error!("failed to take back a look-ahead move: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(name: &str) -> Square {
        name.parse().unwrap()
    }

    #[test]
    fn scoped_move_undoes_on_drop() {
        let mut oracle = ShakmatyOracle::new();
        let before = oracle.board_snapshot();
        let mv = oracle.legal_moves(Side::White, Some(square("e2")))[0];
        {
            let applied = ScopedMove::apply(&mut oracle, &mv).unwrap();
            assert_eq!(applied.side_to_move(), Side::Black);
        }
        assert_eq!(oracle.board_snapshot(), before);
        assert_eq!(oracle.side_to_move(), Side::White);
    }

    #[test]
    fn explicit_undo_does_not_undo_twice() {
        let mut oracle = ShakmatyOracle::new();
        let first = oracle.legal_moves(Side::White, Some(square("g1")))[0];
        oracle.apply_move(&first).unwrap();
        let after_first = oracle.board_snapshot();

        let reply = oracle.legal_moves(Side::Black, Some(square("g8")))[0];
        let applied = ScopedMove::apply(&mut oracle, &reply).unwrap();
        applied.undo().unwrap();

        assert_eq!(oracle.board_snapshot(), after_first);
        assert_eq!(oracle.side_to_move(), Side::Black);
    }

    #[test]
    fn nested_scopes_unwind_in_order() {
        let mut oracle = ShakmatyOracle::new();
        let before = oracle.board_snapshot();
        let mv = oracle.legal_moves(Side::White, Some(square("d2")))[0];
        {
            let mut outer = ScopedMove::apply(&mut oracle, &mv).unwrap();
            let reply = outer.legal_moves(Side::Black, Some(square("d7")))[0];
            let inner = ScopedMove::apply(&mut *outer, &reply).unwrap();
            assert_eq!(inner.side_to_move(), Side::White);
        }
        assert_eq!(oracle.board_snapshot(), before);
    }
}
