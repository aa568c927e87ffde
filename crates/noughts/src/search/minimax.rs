//! Exhaustive minimax recursion.
//!
//! No pruning and no transposition table: at nine squares the full tree is
//! small enough to walk on every call. Larger boards would need alpha-beta
//! or memoization, and any such change has to keep the row-major
//! first-occurrence tie-break at the root.

use super::{DRAW_SCORE, LOSS_SCORE, SearchStats, WIN_SCORE};
use crate::position::Position;
use crate::rules::{has_won, is_full};
use crate::types::{Board, Player, Square};

/// One walk of the game tree, scored from the automated side's view.
#[derive(Debug)]
pub(crate) struct Minimax {
    automated: Player,
    stats: SearchStats,
}

impl Minimax {
    pub(crate) fn new(automated: Player) -> Self {
        Self {
            automated,
            stats: SearchStats::default(),
        }
    }

    pub(crate) fn into_stats(self) -> SearchStats {
        self.stats
    }

    /// Terminal score for `board`, or `None` if play continues.
    ///
    /// The opponent's line is checked first. A trial mark can complete the
    /// automated side's line on a board the opponent already won, and that
    /// board still counts as lost.
    fn terminal_score(&self, board: &Board) -> Option<i32> {
        if has_won(board, self.automated.opponent()) {
            Some(LOSS_SCORE)
        } else if has_won(board, self.automated) {
            Some(WIN_SCORE)
        } else if is_full(board) {
            Some(DRAW_SCORE)
        } else {
            None
        }
    }

    /// Scores `board` with `to_move` about to play.
    ///
    /// Each trial mark is cleared before the next sibling is tried, so
    /// `board` is unchanged when this returns. `depth` is recorded in the
    /// stats but does not bias the score. Callers reject a root board where
    /// both sides hold a line before walking it.
    pub(crate) fn score(&mut self, board: &mut Board, depth: u32, to_move: Player) -> i32 {
        self.stats.nodes += 1;
        self.stats.max_depth = self.stats.max_depth.max(depth);

        if let Some(score) = self.terminal_score(board) {
            self.stats.leaves += 1;
            return score;
        }

        let maximizing = to_move == self.automated;
        let mut best = if maximizing { i32::MIN } else { i32::MAX };

        for pos in Position::ALL {
            if !board.is_empty(pos) {
                continue;
            }
            board.set(pos, Square::Occupied(to_move));
            let score = self.score(board, depth + 1, to_move.opponent());
            board.clear(pos);

            best = if maximizing {
                best.max(score)
            } else {
                best.min(score)
            };
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(board: &str, to_move: Player) -> i32 {
        let mut board: Board = board.parse().unwrap();
        Minimax::new(Player::O).score(&mut board, 0, to_move)
    }

    #[test]
    fn test_terminal_scores() {
        assert_eq!(score("XXX/OO./...", Player::O), LOSS_SCORE);
        assert_eq!(score("OOO/XX./X..", Player::X), WIN_SCORE);
        assert_eq!(score("XOX/XOO/OXX", Player::X), DRAW_SCORE);
    }

    #[test]
    fn test_empty_board_is_a_draw() {
        assert_eq!(score(".........", Player::X), DRAW_SCORE);
        assert_eq!(score(".........", Player::O), DRAW_SCORE);
    }

    #[test]
    fn test_forced_win_for_side_to_move() {
        // O to move completes the middle column
        assert_eq!(score("XOX/.O./X..", Player::O), WIN_SCORE);
        // X to move completes the left column
        assert_eq!(score("XOX/.O./X..", Player::X), LOSS_SCORE);
    }

    #[test]
    fn test_board_restored_after_search() {
        let before: Board = "X../O../..X".parse::<Board>().unwrap();
        let mut board = before;
        Minimax::new(Player::O).score(&mut board, 0, Player::O);
        assert_eq!(board, before);
    }

    #[test]
    fn test_stats_track_depth() {
        let mut board: Board = "XOX/XOO/OX.".parse().unwrap();
        let mut minimax = Minimax::new(Player::O);
        minimax.score(&mut board, 0, Player::X);
        let stats = minimax.into_stats();
        assert_eq!(stats.nodes, 2);
        assert_eq!(stats.leaves, 1);
        assert_eq!(stats.max_depth, 1);
    }

    #[test]
    fn test_opponent_line_checked_first() {
        // A trial mark gave O the middle row after X already took the top
        assert_eq!(score("XXX/OOO/...", Player::X), LOSS_SCORE);
        assert_eq!(score("XXX/OOO/...", Player::O), LOSS_SCORE);
    }
}
