//! Draw detection logic for tic-tac-toe.

use crate::types::{Board, Square};

/// Checks if the board is full (all squares occupied).
pub fn is_full(board: &Board) -> bool {
    board.squares().iter().all(|s| *s != Square::Empty)
}

/// Returns true if every square is occupied.
///
/// This does not look at lines: a full board with a completed line is a
/// win, so callers check for a winner first.
pub fn is_draw(board: &Board) -> bool {
    is_full(board)
}
