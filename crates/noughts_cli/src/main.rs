//! Noughts - terminal front end
//!
//! Owns the board and the turn sequence, and calls the engine for outcomes
//! and computer moves.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod config;
mod controller;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, Side};
use config::CliConfig;
use controller::{ComputerPlayer, Match, Mode, MoveSource, TerminalPlayer};
use noughts::{Board, Player, SearchConfig, Searcher, check_outcome, rules};
use std::io::{self, Write};
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = CliConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Solve {
            board,
            automated,
            parallel,
            json,
        } => run_solve(&config, &board, automated, parallel, json),
        Command::Play { mode, rounds } => run_play(config, mode, rounds),
        Command::Selfplay { rounds } => run_selfplay(config, rounds),
    }
}

/// Print the verdict and the engine's view of one board
#[instrument(skip(config))]
fn run_solve(
    config: &CliConfig,
    board: &str,
    automated: Option<Side>,
    parallel: bool,
    json: bool,
) -> Result<()> {
    let board: Board = board.parse().context("Invalid board")?;

    let automated = match automated {
        Some(side) => Player::from(side),
        None => match rules::validate(&board) {
            Ok(to_move) => to_move,
            Err(e) => {
                warn!(error = %e, "Cannot infer side to move, using configured side");
                *config.search().automated()
            }
        },
    };
    let search = config
        .search()
        .with_automated(automated)
        .with_parallel_root(parallel || *config.search().parallel_root());

    let outcome = check_outcome(&board)?;
    let report = Searcher::new(search).search(&board);

    let mut out = io::stdout().lock();
    if json {
        let value = serde_json::json!({
            "outcome": outcome,
            "automated": automated,
            "report": report.as_ref().ok(),
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
        return Ok(());
    }

    writeln!(out, "{}\n", board)?;
    writeln!(out, "Outcome: {}", outcome)?;
    match report {
        Ok(report) => {
            writeln!(out, "Scores for {}:", automated)?;
            for candidate in report.candidates() {
                writeln!(out, "  {:<14} {:>3}", candidate.position.label(), candidate.score)?;
            }
            let (row, col) = report.best_move().coords();
            writeln!(
                out,
                "Best move: {} (row {}, column {}), score {}",
                report.best_move(),
                row,
                col,
                report.score()
            )?;
            info!(nodes = report.stats().nodes, "Search complete");
        }
        Err(e) => writeln!(out, "No move: {}", e)?,
    }
    Ok(())
}

/// Play rounds in the terminal
#[instrument(skip(config))]
fn run_play(mut config: CliConfig, mode: Option<Mode>, rounds: Option<u32>) -> Result<()> {
    if let Some(mode) = mode {
        config.set_mode(mode);
    }
    if let Some(rounds) = rounds {
        config.set_rounds(rounds);
    }
    info!(mode = ?config.mode(), rounds = config.rounds(), "Starting match");

    let stdin = io::stdin();
    let mut human = TerminalPlayer::new("Player", stdin.lock(), io::stdout());
    let rounds = *config.rounds();

    let score = match config.mode() {
        Mode::VsComputer => {
            let mut computer = ComputerPlayer::new("Computer", Searcher::new(*config.search()));
            let human: &mut dyn MoveSource = &mut human;
            let computer: &mut dyn MoveSource = &mut computer;
            let mut game = match config.search().automated() {
                Player::X => Match::new(computer, human, io::stdout()),
                Player::O => Match::new(human, computer, io::stdout()),
            };
            game.play(rounds)?
        }
        Mode::VsHuman => Match::hot_seat(&mut human, io::stdout()).play(rounds)?,
    };

    println!("Final score: {}", score);
    Ok(())
}

/// Let the engine play itself
#[instrument(skip(config))]
fn run_selfplay(config: CliConfig, rounds: Option<u32>) -> Result<()> {
    let rounds = rounds.unwrap_or(*config.rounds());
    let parallel = *config.search().parallel_root();
    let mut x = ComputerPlayer::new("Engine X", Searcher::new(SearchConfig::new(Player::X, parallel)));
    let mut o = ComputerPlayer::new("Engine O", Searcher::new(SearchConfig::new(Player::O, parallel)));

    let score = Match::new(&mut x, &mut o, io::stdout()).play(rounds)?;
    if *score.x_wins() > 0 || *score.o_wins() > 0 {
        warn!(%score, "Perfect play should always draw");
    }
    println!("Final score: {}", score);
    Ok(())
}
