//! Command-line interface for noughts.

use crate::controller::Mode;
use clap::{Parser, Subcommand, ValueEnum};
use noughts::Player;

/// Noughts - perfect-play tic-tac-toe in the terminal
#[derive(Parser, Debug)]
#[command(name = "noughts")]
#[command(about = "Tic-tac-toe against a perfect-play minimax engine", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<std::path::PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Side selector for the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// X, who moves first
    X,
    /// O, who moves second
    O,
}

impl From<Side> for Player {
    fn from(side: Side) -> Self {
        match side {
            Side::X => Player::X,
            Side::O => Player::O,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Report the outcome, move scores and best move for a board
    Solve {
        /// Nine squares in row-major order, e.g. "XO./.X./..."
        board: String,

        /// Side to search for (defaults to the side to move)
        #[arg(long, value_enum)]
        automated: Option<Side>,

        /// Score root moves in parallel
        #[arg(long)]
        parallel: bool,

        /// Print the search report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Play in the terminal
    Play {
        /// Seating: against the engine or another person
        #[arg(long, value_enum)]
        mode: Option<Mode>,

        /// Number of rounds
        #[arg(short, long)]
        rounds: Option<u32>,
    },

    /// Let the engine play both sides
    Selfplay {
        /// Number of rounds
        #[arg(short, long)]
        rounds: Option<u32>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_solve() {
        let cli = Cli::parse_from(["noughts", "solve", "XX./.O./...", "--automated", "o"]);
        match cli.command {
            Command::Solve {
                board,
                automated,
                parallel,
                json,
            } => {
                assert_eq!(board, "XX./.O./...");
                assert_eq!(automated, Some(Side::O));
                assert!(!parallel);
                assert!(!json);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_play_with_config() {
        let cli = Cli::parse_from([
            "noughts",
            "play",
            "--mode",
            "vs-human",
            "-r",
            "2",
            "--config",
            "noughts.toml",
        ]);
        assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("noughts.toml")));
        match cli.command {
            Command::Play { mode, rounds } => {
                assert_eq!(mode, Some(Mode::VsHuman));
                assert_eq!(rounds, Some(2));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
