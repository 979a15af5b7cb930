mod capture_policy;
pub mod eval;
mod minimax_policy;
mod random_policy;

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use rand::{RngCore, SeedableRng, rngs::StdRng};

pub use capture_policy::CapturePolicy;
pub use minimax_policy::MinimaxPolicy;
pub use random_policy::RandomPolicy;

use crate::{
    config::Settings,
    error::SelectError,
    oracle::PositionOracle,
    types::{Difficulty, Move},
};

/// One way of choosing a move out of the oracle's legal set.
pub trait MovePolicy {
    /// Returns an element of `legal_moves`. Any move applied to `oracle` while
    /// choosing is undone before returning.
    fn choose(
        &mut self,
        oracle: &mut dyn PositionOracle,
        legal_moves: &[Move],
        rng: &mut dyn RngCore,
    ) -> Result<Move, SelectError>;
}

pub fn policy_for(difficulty: Difficulty) -> Box<dyn MovePolicy> {
    match difficulty {
        Difficulty::Easy => Box::new(RandomPolicy),
        Difficulty::Medium => Box::new(CapturePolicy),
        Difficulty::Hard => Box::new(MinimaxPolicy),
    }
}

/// Chooses the computer's move from `legal_moves` at the given difficulty.
///
/// `legal_moves` must be non-empty; the caller handles checkmate and stalemate first.
/// Fails with [`SelectError::OracleDesync`] if the oracle is not back on its starting
/// position afterwards.
pub fn select_move(
    oracle: &mut dyn PositionOracle,
    legal_moves: &[Move],
    difficulty: Difficulty,
    rng: &mut dyn RngCore,
) -> Result<Move, SelectError> {
    if legal_moves.is_empty() {
        return Err(SelectError::NoLegalMoves);
    }

    debug!(
        "Selecting a {difficulty} move. {} possible legal moves available",
        legal_moves.len()
    );
    let board_before = oracle.board_snapshot();
    let side_before = oracle.side_to_move();

    let chosen = policy_for(difficulty).choose(oracle, legal_moves, rng)?;

    if oracle.side_to_move() != side_before || oracle.board_snapshot() != board_before {
        return Err(SelectError::OracleDesync);
    }
    Ok(chosen)
}

/// The computer side of a game, as seen by the controller.
#[async_trait]
pub trait Opponent: Send {
    /// Picks a reply from `legal_moves`, which the caller guarantees is non-empty.
    async fn pick(
        &mut self,
        oracle: &mut (dyn PositionOracle + Send),
        legal_moves: Vec<Move>,
    ) -> Result<Move, SelectError>;

    fn difficulty(&self) -> Difficulty;

    fn set_difficulty(&mut self, difficulty: Difficulty);
}

pub fn init_opponent(settings: &Settings) -> Box<dyn Opponent> {
    let rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    Box::new(ComputerOpponent::new(
        settings.difficulty,
        rng,
        Duration::from_millis(settings.move_delay_ms),
    ))
}

/// Difficulty-driven opponent. Waits `think_delay` before searching so a front end
/// gets a chance to redraw after the human's move.
pub struct ComputerOpponent {
    difficulty: Difficulty,
    rng: StdRng,
    think_delay: Duration,
}

impl ComputerOpponent {
    pub fn new(difficulty: Difficulty, rng: StdRng, think_delay: Duration) -> ComputerOpponent {
        ComputerOpponent {
            difficulty,
            rng,
            think_delay,
        }
    }
}

#[async_trait]
impl Opponent for ComputerOpponent {
    async fn pick(
        &mut self,
        oracle: &mut (dyn PositionOracle + Send),
        legal_moves: Vec<Move>,
    ) -> Result<Move, SelectError> {
        if !self.think_delay.is_zero() {
            tokio::time::sleep(self.think_delay).await;
        }
        let chosen = select_move(oracle, &legal_moves, self.difficulty, &mut self.rng)?;
        info!("Computer ({}) plays {chosen}", self.difficulty);
        Ok(chosen)
    }

    fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }
}
