#![allow(dead_code)]

use chess_opponent::{
    BoardSnapshot, Move, OracleError, Piece, PieceKind, PositionOracle, Side, Square,
};

pub fn square(name: &str) -> Square {
    name.parse().unwrap()
}

pub fn board(pieces: &[(&str, Side, PieceKind)]) -> BoardSnapshot {
    pieces
        .iter()
        .fold(BoardSnapshot::empty(), |board, (name, side, kind)| {
            board.with_piece(square(name), Piece::new(*side, *kind))
        })
}

pub fn quiet(from: &str, to: &str) -> Move {
    Move::new(square(from), square(to), None, None)
}

pub fn capture(from: &str, to: &str, captured: PieceKind) -> Move {
    Move::new(square(from), square(to), None, Some(captured))
}

/// A hand-written game tree: each node has a board, a side to move and its legal moves.
#[derive(Debug, Clone)]
pub struct Node {
    pub board: BoardSnapshot,
    pub side: Side,
    pub moves: Vec<(Move, Node)>,
}

impl Node {
    pub fn leaf(board: BoardSnapshot, side: Side) -> Node {
        Node {
            board,
            side,
            moves: Vec::new(),
        }
    }

    pub fn with(mut self, mv: Move, child: Node) -> Node {
        self.moves.push((mv, child));
        self
    }
}

/// Oracle walking a scripted [`Node`] tree.
pub struct ScriptedOracle {
    root: Node,
    path: Vec<usize>,
    /// Simulates a broken rules engine that forgets to restore the position
    pub leak_undo: bool,
    /// Move the oracle refuses to apply
    pub reject: Option<Move>,
    pub applied: usize,
}

impl ScriptedOracle {
    pub fn new(root: Node) -> ScriptedOracle {
        ScriptedOracle {
            root,
            path: Vec::new(),
            leak_undo: false,
            reject: None,
            applied: 0,
        }
    }

    pub fn depth(&self) -> usize {
        self.path.len()
    }

    fn current(&self) -> &Node {
        self.path
            .iter()
            .fold(&self.root, |node, &index| &node.moves[index].1)
    }
}

impl PositionOracle for ScriptedOracle {
    fn legal_moves(&self, side: Side, from: Option<Square>) -> Vec<Move> {
        let node = self.current();
        if node.side != side {
            return Vec::new();
        }
        node.moves
            .iter()
            .map(|(mv, _)| *mv)
            .filter(|mv| from.is_none_or(|sq| mv.from() == sq))
            .collect()
    }

    fn apply_move(&mut self, mv: &Move) -> Result<(), OracleError> {
        if self.reject == Some(*mv) {
            return Err(OracleError::IllegalMove(*mv));
        }
        let index = self
            .current()
            .moves
            .iter()
            .position(|(candidate, _)| candidate == mv)
            .ok_or(OracleError::IllegalMove(*mv))?;
        self.path.push(index);
        self.applied += 1;
        Ok(())
    }

    fn undo_last_move(&mut self) -> Result<(), OracleError> {
        if self.leak_undo {
            return Ok(());
        }
        self.path.pop().map(|_| ()).ok_or(OracleError::NothingToUndo)
    }

    fn is_game_over(&self) -> bool {
        self.current().moves.is_empty()
    }

    fn is_checkmate(&self) -> bool {
        false
    }

    fn side_to_move(&self) -> Side {
        self.current().side
    }

    fn board_snapshot(&self) -> BoardSnapshot {
        self.current().board.clone()
    }
}
