//! Noughts - tic-tac-toe outcome evaluation and perfect-play search.
//!
//! A pure function library over an explicit board value. The caller owns
//! the board and the turn order; this crate answers two questions about a
//! snapshot:
//!
//! - **Outcome**: has someone won, is it a draw, or is play ongoing?
//! - **Move**: which square should the automated side mark?
//!
//! # Example
//!
//! ```
//! use noughts::{Board, Outcome, Position, check_outcome, choose_move};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // X threatens the top row; O must block.
//! let board: Board = "XX./.O./...".parse()?;
//! assert_eq!(check_outcome(&board)?, Outcome::Ongoing);
//! assert_eq!(choose_move(&board)?, Position::TopRight);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod position;
pub mod rules;
pub mod search;
mod types;

pub use error::{BoardParseError, EngineError};
pub use position::Position;
pub use rules::{Outcome, Unreachable};
pub use search::{
    DRAW_SCORE, LOSS_SCORE, ScoredMove, SearchConfig, SearchReport, SearchStats, Searcher,
    WIN_SCORE,
};
pub use types::{Board, Player, Square};

/// Classifies `board` as a win, a draw, or still in play.
///
/// # Errors
///
/// Returns [`EngineError::BothSidesWon`] if both sides hold a line.
pub fn check_outcome(board: &Board) -> Result<Outcome, EngineError> {
    rules::check_outcome(board)
}

/// Picks the best square for `O`, the default automated side.
///
/// # Errors
///
/// Returns [`EngineError::NoLegalMoves`] on a full board.
pub fn choose_move(board: &Board) -> Result<Position, EngineError> {
    Searcher::default().find_best_move(board)
}
