//! Error types for the evaluator and search engine.

use crate::position::Position;
use crate::rules::Unreachable;
use derive_more::{Display, Error};
use tracing::instrument;

/// Failure to read a board from its text form.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Board parse error: {} at {}:{}", message, file, line)]
pub struct BoardParseError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl BoardParseError {
    /// Creates a new parse error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Errors raised by the engine.
///
/// Every variant reports a bad input or a broken board invariant.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum EngineError {
    /// A move was requested on a board with no empty square.
    #[display("No legal moves: the board is full")]
    NoLegalMoves,

    /// Both sides hold a completed line, which alternating play cannot produce.
    #[display("Invariant violation: both sides have a completed line")]
    BothSidesWon,

    /// A square index outside 0-8.
    #[display("Square index {} is out of bounds (must be 0-8)", _0)]
    OutOfBounds(#[error(not(source))] usize),

    /// A move targeted a square that is already taken.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(#[error(not(source))] Position),

    /// The mark counts or winning lines cannot arise from alternating play.
    #[display("Unreachable board: {}", _0)]
    UnreachableBoard(#[error(not(source))] Unreachable),

    /// The board text could not be read.
    #[display("{}", _0)]
    Parse(BoardParseError),
}

impl From<BoardParseError> for EngineError {
    fn from(err: BoardParseError) -> Self {
        Self::Parse(err)
    }
}
