//! Reachability checks for board snapshots.
//!
//! The evaluator and search accept any board. [`validate`] describes the
//! boards that alternating play from an empty board (X first) can actually
//! produce, for callers that receive boards from outside.

use super::win::has_won;
use crate::error::EngineError;
use crate::types::{Board, Player};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

/// Why a board cannot arise from alternating play with X first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Unreachable {
    /// O has more marks than X.
    #[display("O has {o} marks but X only {x}, and X moves first")]
    OMovedFirst {
        /// X marks on the board.
        x: usize,
        /// O marks on the board.
        o: usize,
    },

    /// X is two or more marks ahead of O.
    #[display("X has {x} marks but O only {o}, so X moved twice in a row")]
    XMovedTwice {
        /// X marks on the board.
        x: usize,
        /// O marks on the board.
        o: usize,
    },

    /// The loser moved after the line was completed.
    #[display("{winner} completed a line but {} moved afterwards", winner.opponent())]
    MovedAfterWin {
        /// Side holding the line.
        winner: Player,
    },
}

/// Mark counts must alternate starting with X.
fn check_turn_order(x: usize, o: usize) -> Result<(), Unreachable> {
    if o > x {
        Err(Unreachable::OMovedFirst { x, o })
    } else if x > o + 1 {
        Err(Unreachable::XMovedTwice { x, o })
    } else {
        Ok(())
    }
}

/// Play stops at the first win, so an X win leaves X one mark ahead and an
/// O win leaves the counts equal.
fn check_winner_moved_last(winner: Player, x: usize, o: usize) -> Result<(), Unreachable> {
    let moved_last = match winner {
        Player::X => x == o + 1,
        Player::O => x == o,
    };
    if moved_last {
        Ok(())
    } else {
        Err(Unreachable::MovedAfterWin { winner })
    }
}

/// Checks that a board is reachable and returns the side to move.
///
/// # Errors
///
/// Returns [`EngineError::BothSidesWon`] when both sides hold a line and
/// [`EngineError::UnreachableBoard`] with the first broken rule otherwise.
#[instrument(skip(board), fields(board = %board))]
pub fn validate(board: &Board) -> Result<Player, EngineError> {
    let winner = match (has_won(board, Player::X), has_won(board, Player::O)) {
        (true, true) => {
            warn!("Both sides hold a completed line");
            return Err(EngineError::BothSidesWon);
        }
        (true, false) => Some(Player::X),
        (false, true) => Some(Player::O),
        (false, false) => None,
    };

    let x = board.count(Player::X);
    let o = board.count(Player::O);
    check_turn_order(x, o)
        .and_then(|()| match winner {
            Some(winner) => check_winner_moved_last(winner, x, o),
            None => Ok(()),
        })
        .map_err(|reason| {
            warn!(%reason, "Board is not reachable");
            EngineError::UnreachableBoard(reason)
        })?;

    Ok(if x == o { Player::X } else { Player::O })
}
