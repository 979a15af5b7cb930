use crate::types::{BoardSnapshot, Side};

/// Material balance from `perspective`: its pieces count positively, the opponent's negatively.
///
/// Only material counts. No positional, mobility or king-safety terms.
pub fn evaluate(board: &BoardSnapshot, perspective: Side) -> i32 {
    board
        .pieces()
        .map(|piece| {
            let value = piece.kind.value();
            if piece.side == perspective { value } else { -value }
        })
        .sum()
}
