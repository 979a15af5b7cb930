//! Board-level value types shared by the oracle, the evaluator and the move selector.
//!
//! Coordinates follow the on-screen orientation with white at the bottom:
//! row 0 is rank 8 and column 0 is file a.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => f.write_str("White"),
            Side::Black => f.write_str("Black"),
        }
    }
}

impl FromStr for Side {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "white" | "w" => Ok(Side::White),
            "black" | "b" => Ok(Side::Black),
            _ => Err(ParseError::Side(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Standard material value in pawns. The king is never traded, so it is worth nothing.
    pub fn value(self) -> i32 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::Knight => 3,
            PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => 0,
        }
    }

    pub fn char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    pub fn from_char(c: char) -> Option<PieceKind> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub side: Side,
    pub kind: PieceKind,
}

impl Piece {
    pub fn new(side: Side, kind: PieceKind) -> Piece {
        Piece { side, kind }
    }

    /// FEN-style letter: uppercase for white, lowercase for black.
    pub fn char(self) -> char {
        match self.side {
            Side::White => self.kind.char().to_ascii_uppercase(),
            Side::Black => self.kind.char(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    pub fn new(row: u8, col: u8) -> Option<Square> {
        (row < 8 && col < 8).then_some(Square { row, col })
    }

    pub fn row(self) -> u8 {
        self.row
    }

    pub fn col(self) -> u8 {
        self.col
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.col) as char;
        let rank = 8 - self.row;
        write!(f, "{file}{rank}")
    }
}

impl FromStr for Square {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.trim().as_bytes();
        let [file @ b'a'..=b'h', rank @ b'1'..=b'8'] = bytes else {
            return Err(ParseError::Square(s.to_string()));
        };
        Ok(Square {
            row: 8 - (rank - b'0'),
            col: file - b'a',
        })
    }
}

/// A move as reported by the position oracle.
///
/// Fields are private so a `Move` cannot be altered after the oracle hands it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    from: Square,
    to: Square,
    promotion: Option<PieceKind>,
    captured: Option<PieceKind>,
}

impl Move {
    pub fn new(
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
        captured: Option<PieceKind>,
    ) -> Move {
        Move {
            from,
            to,
            promotion,
            captured,
        }
    }

    pub fn from(&self) -> Square {
        self.from
    }

    pub fn to(&self) -> Square {
        self.to
    }

    pub fn promotion(&self) -> Option<PieceKind> {
        self.promotion
    }

    pub fn captured(&self) -> Option<PieceKind> {
        self.captured
    }

    /// Value of the captured piece, 0 for quiet moves.
    pub fn capture_value(&self) -> i32 {
        self.captured.map_or(0, PieceKind::value)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.char())?;
        }
        Ok(())
    }
}

/// Read-only picture of the board at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoardSnapshot {
    cells: [[Option<Piece>; 8]; 8],
}

impl BoardSnapshot {
    pub fn empty() -> BoardSnapshot {
        BoardSnapshot {
            cells: [[None; 8]; 8],
        }
    }

    pub fn with_piece(mut self, square: Square, piece: Piece) -> BoardSnapshot {
        self.set(square, Some(piece));
        self
    }

    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.cells[square.row as usize][square.col as usize] = piece;
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.cells[square.row as usize][square.col as usize]
    }

    pub fn pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        self.cells.iter().flatten().filter_map(|cell| *cell)
    }
}

impl fmt::Display for BoardSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            write!(f, "{} ", 8 - i)?;
            for cell in row {
                write!(f, " {}", cell.map_or('.', Piece::char))?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

/// Strength of the computer opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => f.write_str("easy"),
            Difficulty::Medium => f.write_str("medium"),
            Difficulty::Hard => f.write_str("hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ParseError::Difficulty(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn squares_use_screen_orientation() {
        let a8: Square = "a8".parse().unwrap();
        assert_eq!((a8.row(), a8.col()), (0, 0));
        let h1: Square = "h1".parse().unwrap();
        assert_eq!((h1.row(), h1.col()), (7, 7));
        assert_eq!(Square::new(4, 4).unwrap().to_string(), "e4");
    }

    #[test]
    fn rejects_off_board_squares() {
        assert!(Square::new(8, 0).is_none());
        assert!("i1".parse::<Square>().is_err());
        assert!("a9".parse::<Square>().is_err());
        assert!("e".parse::<Square>().is_err());
    }

    #[test]
    fn move_display_includes_promotion() {
        let mv = Move::new(
            "e7".parse().unwrap(),
            "e8".parse().unwrap(),
            Some(PieceKind::Queen),
            None,
        );
        assert_eq!(mv.to_string(), "e7e8q");
        assert_eq!(mv.capture_value(), 0);
    }

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert_eq!(" medium ".parse::<Difficulty>().unwrap(), Difficulty::Medium);
        assert!("impossible".parse::<Difficulty>().is_err());
    }

    #[test]
    fn snapshot_renders_white_in_uppercase() {
        let board = BoardSnapshot::empty()
            .with_piece("a8".parse().unwrap(), Piece::new(Side::Black, PieceKind::Rook))
            .with_piece("h1".parse().unwrap(), Piece::new(Side::White, PieceKind::King));
        let text = board.to_string();
        assert!(text.starts_with("8  r . . . . . . ."));
        assert!(text.contains("1  . . . . . . . K"));
    }
}
