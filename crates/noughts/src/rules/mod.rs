//! Game rules for tic-tac-toe.
//!
//! Pure functions over a board snapshot. Rules are separated from board
//! storage so the search can call them at every leaf.

pub mod draw;
pub mod legality;
pub mod outcome;
pub mod win;

pub use draw::{is_draw, is_full};
pub use legality::{Unreachable, validate};
pub use outcome::{Outcome, check_outcome, is_ongoing};
pub use win::{LINES, check_winner, has_won};
