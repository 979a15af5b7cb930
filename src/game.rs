//! Turn sequencing for a human-vs-computer game.

use log::{info, warn};

use crate::{
    config::Settings,
    engine::{Opponent, init_opponent},
    error::GameError,
    oracle::{PositionOracle, ShakmatyOracle},
    types::{BoardSnapshot, Difficulty, Move, PieceKind, Side, Square},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Checkmate { winner: Side },
    Draw,
}

pub struct Game<O: PositionOracle + Send> {
    oracle: O,
    human: Side,
    opponent: Box<dyn Opponent>,
}

impl Game<ShakmatyOracle> {
    /// A new game from the standard starting position.
    pub fn standard(settings: &Settings) -> Game<ShakmatyOracle> {
        Game::new(ShakmatyOracle::new(), settings)
    }
}

impl<O: PositionOracle + Send> Game<O> {
    pub fn new(oracle: O, settings: &Settings) -> Game<O> {
        Game::with_opponent(oracle, settings.human_side(), init_opponent(settings))
    }

    pub fn with_opponent(oracle: O, human: Side, opponent: Box<dyn Opponent>) -> Game<O> {
        Game {
            oracle,
            human,
            opponent,
        }
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn board(&self) -> BoardSnapshot {
        self.oracle.board_snapshot()
    }

    pub fn human_side(&self) -> Side {
        self.human
    }

    pub fn computer_side(&self) -> Side {
        self.human.opponent()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.opponent.difficulty()
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        info!("Difficulty set to {difficulty}");
        self.opponent.set_difficulty(difficulty);
    }

    pub fn status(&self) -> GameStatus {
        if self.oracle.is_checkmate() {
            // the side that is mated is the one to move
            GameStatus::Checkmate {
                winner: self.oracle.side_to_move().opponent(),
            }
        } else if self.oracle.is_game_over() {
            GameStatus::Draw
        } else {
            GameStatus::Ongoing
        }
    }

    pub fn is_computer_turn(&self) -> bool {
        self.status() == GameStatus::Ongoing && self.oracle.side_to_move() == self.computer_side()
    }

    /// Squares the human's piece on `from` can move to. Empty when there is no such
    /// piece or it is not the human's turn.
    pub fn targets_from(&self, from: Square) -> Vec<Square> {
        let mut targets = Vec::new();
        for mv in self.oracle.legal_moves(self.human, Some(from)) {
            // promotions list one entry per piece kind
            if !targets.contains(&mv.to()) {
                targets.push(mv.to());
            }
        }
        targets
    }

    /// Plays the human's move. A pawn reaching the last rank becomes a queen unless
    /// `promotion` says otherwise.
    pub fn play_human(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<GameStatus, GameError> {
        if self.status() != GameStatus::Ongoing {
            return Err(GameError::GameOver);
        }
        let to_move = self.oracle.side_to_move();
        if to_move != self.human {
            return Err(GameError::NotYourTurn(to_move));
        }

        // a promotion piece is only accepted on a promoting move
        let Some(mv) = self
            .oracle
            .legal_moves(self.human, Some(from))
            .into_iter()
            .find(|mv| {
                mv.to() == to
                    && mv.promotion() == promotion.or(mv.promotion().map(|_| PieceKind::Queen))
            })
        else {
            warn!("Rejected illegal move {from}{to}");
            return Err(GameError::IllegalMove { from, to });
        };

        self.oracle.apply_move(&mv)?;
        info!("{} played {mv}", self.human);
        Ok(self.status())
    }

    /// Lets the computer answer. Returns `None` when the game is over.
    pub async fn play_computer(&mut self) -> Result<Option<Move>, GameError> {
        if self.status() != GameStatus::Ongoing {
            return Ok(None);
        }
        let side = self.computer_side();
        if self.oracle.side_to_move() != side {
            return Err(GameError::NotYourTurn(self.human));
        }

        let legal_moves = self.oracle.legal_moves(side, None);
        if legal_moves.is_empty() {
            return Ok(None);
        }

        let chosen = self.opponent.pick(&mut self.oracle, legal_moves).await?;
        self.oracle.apply_move(&chosen)?;
        if let GameStatus::Checkmate { winner } = self.status() {
            info!("Checkmate, {winner} wins");
        }
        Ok(Some(chosen))
    }
}
