//! Perfect-play move search.
//!
//! The [`Searcher`] scores every empty square by walking the full game
//! tree and picks the best one for the automated side. It holds no board
//! between calls; each call works on its own copy of the snapshot it is
//! given.

mod minimax;
mod root;

use crate::error::EngineError;
use crate::position::Position;
use crate::rules::check_winner;
use crate::types::{Board, Player};
use derive_getters::Getters;
use minimax::Minimax;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Score of a position the automated side wins under perfect play.
pub const WIN_SCORE: i32 = 10;
/// Score of a position the opponent wins under perfect play.
pub const LOSS_SCORE: i32 = -10;
/// Score of a forced draw.
pub const DRAW_SCORE: i32 = 0;

/// Search settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Side the engine plays for. Scores are from this side's view.
    automated: Player,

    /// Score root candidates on the rayon pool instead of one by one.
    parallel_root: bool,
}

impl SearchConfig {
    /// Creates a configuration.
    pub fn new(automated: Player, parallel_root: bool) -> Self {
        Self {
            automated,
            parallel_root,
        }
    }

    /// Returns a copy playing for `automated`.
    pub fn with_automated(self, automated: Player) -> Self {
        Self { automated, ..self }
    }

    /// Returns a copy with root parallelism switched on or off.
    pub fn with_parallel_root(self, parallel_root: bool) -> Self {
        Self {
            parallel_root,
            ..self
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            automated: Player::O,
            parallel_root: false,
        }
    }
}

/// Work counters for one search call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Positions visited, root candidates included.
    pub nodes: u64,
    /// Terminal positions reached.
    pub leaves: u64,
    /// Deepest ply below the scored position.
    pub max_depth: u32,
}

impl SearchStats {
    /// Folds another walk's counters into these.
    pub fn merge(&mut self, other: &SearchStats) {
        self.nodes += other.nodes;
        self.leaves += other.leaves;
        self.max_depth = self.max_depth.max(other.max_depth);
    }
}

/// A root candidate and its minimax score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredMove {
    /// Square the automated side would mark.
    pub position: Position,
    /// Score after that mark with the opponent to move.
    pub score: i32,
}

/// Full result of a root search.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct SearchReport {
    /// Chosen square.
    best_move: Position,
    /// Score of the chosen square.
    score: i32,
    /// Every candidate in row-major order.
    candidates: Vec<ScoredMove>,
    /// Work done across all candidates.
    stats: SearchStats,
}

/// Perfect-play move chooser for one side.
#[derive(Debug, Clone, Copy, Default, Getters)]
pub struct Searcher {
    config: SearchConfig,
}

impl Searcher {
    /// Creates a searcher with the given settings.
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    /// Creates a sequential searcher playing for `automated`.
    pub fn for_player(automated: Player) -> Self {
        Self::new(SearchConfig::default().with_automated(automated))
    }

    /// Minimax score of `board` with `to_move` about to play.
    ///
    /// `+10` is a forced win for the automated side, `-10` a forced win for
    /// its opponent and `0` a forced draw. The caller's board is not touched.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::BothSidesWon`] if both sides already hold a
    /// line on `board`.
    #[instrument(skip(self, board), fields(board = %board, automated = %self.config.automated))]
    pub fn evaluate(&self, board: &Board, to_move: Player) -> Result<i32, EngineError> {
        check_winner(board)?;
        let mut scratch = *board;
        let mut minimax = Minimax::new(self.config.automated);
        let score = minimax.score(&mut scratch, 0, to_move);
        debug_assert_eq!(&scratch, board, "search left a mark behind");
        debug!(score, stats = ?minimax.into_stats(), "Position evaluated");
        Ok(score)
    }

    /// Scores every empty square for the automated side, in row-major order.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoLegalMoves`] on a full board.
    pub fn score_moves(&self, board: &Board) -> Result<Vec<ScoredMove>, EngineError> {
        Ok(self.search(board)?.candidates)
    }

    /// Returns the square with the strictly greatest score.
    ///
    /// Ties go to the first candidate in row-major order, so the result is
    /// reproducible and independent of `parallel_root`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoLegalMoves`] on a full board.
    pub fn find_best_move(&self, board: &Board) -> Result<Position, EngineError> {
        Ok(self.search(board)?.best_move)
    }

    /// Runs the root search and returns the choice with its supporting data.
    ///
    /// A board one side has already won is still searched while empty
    /// squares remain. Every candidate then scores the finished result.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::BothSidesWon`] if both sides hold a line and
    /// [`EngineError::NoLegalMoves`] on a full board.
    #[instrument(skip(self, board), fields(board = %board, automated = %self.config.automated))]
    pub fn search(&self, board: &Board) -> Result<SearchReport, EngineError> {
        check_winner(board)?;
        let candidates = Position::valid_moves(board);
        if candidates.is_empty() {
            return Err(EngineError::NoLegalMoves);
        }

        let (scored, stats) = if self.config.parallel_root {
            root::score_parallel(board, &candidates, self.config.automated)
        } else {
            root::score_sequential(board, &candidates, self.config.automated)
        };

        let best = root::first_best(&scored).ok_or(EngineError::NoLegalMoves)?;
        debug!(
            best_move = %best.position,
            score = best.score,
            nodes = stats.nodes,
            parallel = self.config.parallel_root,
            "Move chosen"
        );

        Ok(SearchReport {
            best_move: best.position,
            score: best.score,
            candidates: scored,
            stats,
        })
    }
}
