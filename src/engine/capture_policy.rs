use log::debug;
use rand::RngCore;

use super::{MovePolicy, random_policy::pick_random};
use crate::{error::SelectError, oracle::PositionOracle, types::Move};

/// Greedy capture: takes the most valuable piece on offer, otherwise plays at random.
#[derive(Debug, Clone, Copy, Default)]
pub struct CapturePolicy;

impl MovePolicy for CapturePolicy {
    fn choose(
        &mut self,
        _oracle: &mut dyn PositionOracle,
        legal_moves: &[Move],
        rng: &mut dyn RngCore,
    ) -> Result<Move, SelectError> {
        let mut best: Option<(&Move, i32)> = None;
        for mv in legal_moves {
            let score = mv.capture_value();
            // strictly greater: the first of equally valuable captures wins
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((mv, score));
            }
        }

        match best {
            None => Err(SelectError::NoLegalMoves),
            Some((mv, score)) if score > 0 => {
                debug!("capturing with {mv} (worth {score})");
                Ok(*mv)
            }
            Some(_) => pick_random(legal_moves, rng),
        }
    }
}
