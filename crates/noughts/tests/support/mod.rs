//! Shared fixtures for integration tests.

#![allow(dead_code)]

use noughts::{Board, Outcome, Player, Position, Square, check_outcome};
use std::collections::HashSet;

/// Every board reachable from the empty board with X moving first,
/// terminal positions included, in discovery order.
pub fn reachable_boards() -> Vec<Board> {
    let mut seen = HashSet::new();
    let mut order = Vec::new();
    walk(Board::new(), Player::X, &mut seen, &mut order);
    order
}

fn walk(board: Board, to_move: Player, seen: &mut HashSet<Board>, order: &mut Vec<Board>) {
    if !seen.insert(board) {
        return;
    }
    order.push(board);
    if check_outcome(&board).unwrap().is_terminal() {
        return;
    }
    for pos in Position::valid_moves(&board) {
        let mut child = board;
        child.set(pos, Square::Occupied(to_move));
        walk(child, to_move.opponent(), seen, order);
    }
}

/// Side to move on a reachable board.
pub fn side_to_move(board: &Board) -> Player {
    if board.count(Player::X) == board.count(Player::O) {
        Player::X
    } else {
        Player::O
    }
}

/// Returns true if `outcome` is a loss for `player`.
pub fn lost(outcome: Outcome, player: Player) -> bool {
    outcome == Outcome::Win(player.opponent())
}
