//! Collision test between the active piece and the board.

use crate::board::{Board, EMPTY};
use crate::piece::ActivePiece;

/// True if any occupied cell of `piece` lies outside the board (any side,
/// including above row 0) or over a locked cell.
pub fn collides(board: &Board, piece: &ActivePiece) -> bool {
    piece
        .cells()
        .any(|(x, y)| board.get(x, y).is_none_or(|cell| cell != EMPTY))
}
