//! Terminal-state classification for a board snapshot.

use super::draw::is_draw;
use super::win::check_winner;
use crate::error::EngineError;
use crate::types::{Board, Player};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Result of evaluating a board. Derived on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The player holds a completed line.
    Win(Player),
    /// Every square is filled and nobody has a line.
    Draw,
    /// At least one empty square and no completed line.
    Ongoing,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Win(player) => Some(*player),
            Outcome::Draw | Outcome::Ongoing => None,
        }
    }

    /// Returns true if the game was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw)
    }

    /// Returns true for a win or a draw.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Win(player) => write!(f, "Player {} wins", player),
            Outcome::Draw => write!(f, "Draw"),
            Outcome::Ongoing => write!(f, "In progress"),
        }
    }
}

/// Classifies a board as exactly one of win, draw or ongoing.
///
/// Wins are checked before fullness, so a board filled by a winning move
/// is a win.
///
/// # Errors
///
/// Returns [`EngineError::BothSidesWon`] if both sides hold a line.
#[instrument(skip(board), fields(board = %board))]
pub fn check_outcome(board: &Board) -> Result<Outcome, EngineError> {
    if let Some(winner) = check_winner(board)? {
        return Ok(Outcome::Win(winner));
    }
    if is_draw(board) {
        return Ok(Outcome::Draw);
    }
    Ok(Outcome::Ongoing)
}

/// Returns true if neither side has won and the board is not full.
pub fn is_ongoing(board: &Board) -> Result<bool, EngineError> {
    Ok(check_outcome(board)? == Outcome::Ongoing)
}
