use std::str::FromStr;

use anyhow::{Result, bail};
use shakmaty::{Square as EngineSquare, uci::UciMove};

use crate::types::{PieceKind, Square};

/// A move typed by the human, in coordinate notation such as `e2e4` or `e7e8q`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveInput {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

pub fn parse_move_input(move_str: &str) -> Result<MoveInput> {
    let uci_move = UciMove::from_str(move_str.trim())?;

    match uci_move {
        UciMove::Normal {
            from,
            to,
            promotion,
        } => Ok(MoveInput {
            from: parse_engine_square(from)?,
            to: parse_engine_square(to)?,
            promotion: promotion.and_then(|role| PieceKind::from_char(role.char())),
        }),
        _ => bail!("{move_str:?} is not a board move"),
    }
}

fn parse_engine_square(square: EngineSquare) -> Result<Square> {
    Ok(square.to_string().parse()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_promotion_moves() {
        let push = parse_move_input(" e2e4\n").unwrap();
        assert_eq!(push.from.to_string(), "e2");
        assert_eq!(push.to.to_string(), "e4");
        assert_eq!(push.promotion, None);

        let promotion = parse_move_input("a7a8n").unwrap();
        assert_eq!(promotion.promotion, Some(PieceKind::Knight));
    }

    #[test]
    fn rejects_garbage_and_drops() {
        assert!(parse_move_input("hello").is_err());
        assert!(parse_move_input("0000").is_err());
        assert!(parse_move_input("Q@e4").is_err());
    }
}
