use std::time::Instant;

use log::{debug, info};
use rand::RngCore;

use super::{MovePolicy, eval::evaluate};
use crate::{
    error::SelectError,
    oracle::{PositionOracle, ScopedMove},
    types::{Move, Side},
};

/// Two-ply minimax on material: play the move whose worst reply leaves the most material.
///
/// Full width, no pruning. Every look-ahead move goes through [`ScopedMove`], so the
/// oracle is back on the root position whenever `choose` returns.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinimaxPolicy;

impl MovePolicy for MinimaxPolicy {
    fn choose(
        &mut self,
        oracle: &mut dyn PositionOracle,
        legal_moves: &[Move],
        _rng: &mut dyn RngCore,
    ) -> Result<Move, SelectError> {
        let start = Instant::now();
        let mover = oracle.side_to_move();

        let mut best: Option<(Move, i32)> = None;
        let mut lines = Vec::with_capacity(legal_moves.len());
        for mv in legal_moves {
            let eval = worst_reply(oracle, mv, mover)?;
            lines.push((*mv, eval));
            // strictly greater: ties keep the earlier candidate
            if best.is_none_or(|(_, best_eval)| eval > best_eval) {
                best = Some((*mv, eval));
            }
        }
        let (chosen, best_eval) = best.ok_or(SelectError::NoLegalMoves)?;

        info!(
            "Chose {chosen} (eval: {best_eval:+}, candidates: {}, searched: {:.3}s)",
            legal_moves.len(),
            start.elapsed().as_secs_f32()
        );
        debug!(
            "Calculated lines were: \n{}",
            lines
                .iter()
                .map(|(m, e)| format!("{:>6}  :  {:+}", m.to_string(), e))
                .collect::<Vec<_>>()
                .join("\n")
        );

        Ok(chosen)
    }
}

/// Score of `mv` for `mover`, assuming the opponent answers with its best reply.
fn worst_reply(oracle: &mut dyn PositionOracle, mv: &Move, mover: Side) -> Result<i32, SelectError> {
    let mut after_move = ScopedMove::apply(oracle, mv)?;
    let replies = after_move.legal_moves(mover.opponent(), None);

    let eval = if replies.is_empty() {
        evaluate(&after_move.board_snapshot(), mover)
    } else {
        let mut worst = i32::MAX;
        for reply in &replies {
            let after_reply = ScopedMove::apply(&mut *after_move, reply)?;
            worst = worst.min(evaluate(&after_reply.board_snapshot(), mover));
            after_reply.undo()?;
        }
        worst
    };

    after_move.undo()?;
    Ok(eval)
}
