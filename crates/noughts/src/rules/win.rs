//! Win detection logic for tic-tac-toe.

use crate::error::EngineError;
use crate::position::Position;
use crate::types::{Board, Player, Square};
use tracing::{instrument, warn};

/// The eight winning lines: rows, then columns, then diagonals.
pub const LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// Returns true if `player` holds any complete line.
///
/// Stops at the first matching line.
pub fn has_won(board: &Board, player: Player) -> bool {
    let mark = Square::Occupied(player);
    LINES
        .iter()
        .any(|line| line.iter().all(|&pos| board.get(pos) == mark))
}

/// Checks if there is a winner on the board.
///
/// Returns `Ok(Some(player))` if exactly one side has three in a row and
/// `Ok(None)` if neither does.
///
/// # Errors
///
/// Returns [`EngineError::BothSidesWon`] if both sides hold a line.
#[instrument(skip(board), fields(board = %board))]
pub fn check_winner(board: &Board) -> Result<Option<Player>, EngineError> {
    match (has_won(board, Player::X), has_won(board, Player::O)) {
        (true, true) => {
            warn!("Both sides hold a completed line");
            Err(EngineError::BothSidesWon)
        }
        (true, false) => Ok(Some(Player::X)),
        (false, true) => Ok(Some(Player::O)),
        (false, false) => Ok(None),
    }
}
