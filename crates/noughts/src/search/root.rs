//! Root move enumeration and selection.

use super::minimax::Minimax;
use super::{ScoredMove, SearchStats};
use crate::position::Position;
use crate::types::{Board, Player, Square};
use rayon::prelude::*;
use tracing::trace;

/// Scores one root candidate on a private copy of `board`.
fn score_candidate(board: &Board, pos: Position, automated: Player) -> (ScoredMove, SearchStats) {
    let mut child = *board;
    child.set(pos, Square::Occupied(automated));
    let mut minimax = Minimax::new(automated);
    let score = minimax.score(&mut child, 1, automated.opponent());
    trace!(position = %pos, score, "Candidate scored");
    (ScoredMove { position: pos, score }, minimax.into_stats())
}

/// Scores candidates one after another.
pub(super) fn score_sequential(
    board: &Board,
    candidates: &[Position],
    automated: Player,
) -> (Vec<ScoredMove>, SearchStats) {
    let mut scored = Vec::with_capacity(candidates.len());
    let mut stats = SearchStats::default();
    for &pos in candidates {
        let (mv, walk) = score_candidate(board, pos, automated);
        stats.merge(&walk);
        scored.push(mv);
    }
    (scored, stats)
}

/// Scores candidates on the rayon pool.
///
/// Each task owns its own board copy. `collect` keeps the input order, so
/// the result lines up with `candidates` whatever order tasks finish in.
pub(super) fn score_parallel(
    board: &Board,
    candidates: &[Position],
    automated: Player,
) -> (Vec<ScoredMove>, SearchStats) {
    let results: Vec<(ScoredMove, SearchStats)> = candidates
        .par_iter()
        .map(|&pos| score_candidate(board, pos, automated))
        .collect();

    let mut stats = SearchStats::default();
    let scored = results
        .into_iter()
        .map(|(mv, walk)| {
            stats.merge(&walk);
            mv
        })
        .collect();
    (scored, stats)
}

/// First candidate with the strictly greatest score.
pub(super) fn first_best(scored: &[ScoredMove]) -> Option<ScoredMove> {
    let mut best: Option<ScoredMove> = None;
    for &mv in scored {
        if best.is_none_or(|b| mv.score > b.score) {
            best = Some(mv);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(position: Position, score: i32) -> ScoredMove {
        ScoredMove { position, score }
    }

    #[test]
    fn test_first_best_prefers_earliest_tie() {
        let scored = [
            mv(Position::TopCenter, 0),
            mv(Position::Center, 10),
            mv(Position::BottomLeft, 10),
        ];
        assert_eq!(first_best(&scored), Some(mv(Position::Center, 10)));
    }

    #[test]
    fn test_first_best_all_losing() {
        let scored = [mv(Position::TopRight, -10), mv(Position::BottomRight, -10)];
        assert_eq!(first_best(&scored), Some(mv(Position::TopRight, -10)));
    }

    #[test]
    fn test_first_best_empty() {
        assert_eq!(first_best(&[]), None);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let board: Board = "X...O...X".parse().unwrap();
        let candidates = Position::valid_moves(&board);
        let (seq, seq_stats) = score_sequential(&board, &candidates, Player::O);
        let (par, par_stats) = score_parallel(&board, &candidates, Player::O);
        assert_eq!(seq, par);
        assert_eq!(seq_stats, par_stats);
    }
}
