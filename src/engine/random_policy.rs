use rand::{RngCore, seq::IndexedRandom};

use super::MovePolicy;
use crate::{error::SelectError, oracle::PositionOracle, types::Move};

/// Plays any legal move, uniformly at random.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPolicy;

impl MovePolicy for RandomPolicy {
    fn choose(
        &mut self,
        _oracle: &mut dyn PositionOracle,
        legal_moves: &[Move],
        rng: &mut dyn RngCore,
    ) -> Result<Move, SelectError> {
        pick_random(legal_moves, rng)
    }
}

pub(super) fn pick_random(legal_moves: &[Move], rng: &mut dyn RngCore) -> Result<Move, SelectError> {
    legal_moves
        .choose(rng)
        .copied()
        .ok_or(SelectError::NoLegalMoves)
}
