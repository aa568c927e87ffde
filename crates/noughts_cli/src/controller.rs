//! Match controller: owns the board, the turn order and the score.
//!
//! The engine never sees this state. After each move the controller asks
//! the evaluator for an outcome, and when the automated side is up it asks
//! the searcher for a square.

use clap::ValueEnum;
use derive_getters::Getters;
use derive_more::Display;
use noughts::{Board, EngineError, Outcome, Player, Position, Searcher, Square, check_outcome};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::io::{BufRead, Write};
use tracing::{debug, info, instrument, warn};

/// Who sits on each side of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// A person plays X against the engine.
    #[default]
    VsComputer,
    /// Two people share the terminal.
    VsHuman,
}

/// A player placing their mark at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{} -> {}", player, position)]
pub struct Move {
    /// The player making the move.
    pub player: Player,
    /// The position where the player places their mark.
    pub position: Position,
}

/// Error that can occur when applying a move to a round.
#[derive(Debug, Clone, PartialEq, Eq, Display, derive_more::Error)]
pub enum MoveError {
    /// The square at the position is already occupied.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(#[error(not(source))] Position),

    /// The round is already over.
    #[display("Round is already over: {}", _0)]
    RoundOver(#[error(not(source))] Outcome),

    /// The evaluator rejected the board.
    #[display("{}", _0)]
    Engine(EngineError),
}

impl From<EngineError> for MoveError {
    fn from(err: EngineError) -> Self {
        Self::Engine(err)
    }
}

/// One round of play: the authoritative board and its history.
#[derive(Debug, Clone, Getters)]
pub struct Round {
    /// The board.
    board: Board,
    /// Side about to move.
    to_move: Player,
    /// Moves so far, in order.
    history: Vec<Move>,
    /// Outcome after the last move.
    outcome: Outcome,
}

impl Round {
    /// Starts a round on an empty board with X to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            to_move: Player::X,
            history: Vec::new(),
            outcome: Outcome::Ongoing,
        }
    }

    /// Marks `position` for the side to move and re-evaluates the board.
    ///
    /// # Errors
    ///
    /// Fails if the round has ended or the square is taken. The board is
    /// unchanged on error.
    #[instrument(skip(self), fields(player = %self.to_move))]
    pub fn play(&mut self, position: Position) -> Result<Outcome, MoveError> {
        if self.outcome.is_terminal() {
            return Err(MoveError::RoundOver(self.outcome));
        }
        if !self.board.is_empty(position) {
            return Err(MoveError::SquareOccupied(position));
        }

        let mut next = self.board;
        next.set(position, Square::Occupied(self.to_move));
        let outcome = check_outcome(&next)?;

        self.board = next;
        self.history.push(Move {
            player: self.to_move,
            position,
        });
        self.outcome = outcome;
        self.to_move = self.to_move.opponent();
        debug!(%position, %outcome, "Move applied");
        Ok(outcome)
    }
}

impl Default for Round {
    fn default() -> Self {
        Self::new()
    }
}

/// Running tally across rounds. Kept in memory only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters, Serialize)]
pub struct Scoreboard {
    /// Rounds won by X.
    x_wins: u32,
    /// Rounds won by O.
    o_wins: u32,
    /// Rounds drawn.
    draws: u32,
    /// Draws in a row since the last win.
    consecutive_draws: u32,
}

impl Scoreboard {
    /// Records a finished round. Ongoing outcomes are ignored.
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win(Player::X) => {
                self.x_wins += 1;
                self.consecutive_draws = 0;
            }
            Outcome::Win(Player::O) => {
                self.o_wins += 1;
                self.consecutive_draws = 0;
            }
            Outcome::Draw => {
                self.draws += 1;
                self.consecutive_draws += 1;
            }
            Outcome::Ongoing => warn!("Ignoring unfinished round"),
        }
    }

    /// Rounds recorded.
    pub fn rounds(&self) -> u32 {
        self.x_wins + self.o_wins + self.draws
    }
}

impl std::fmt::Display for Scoreboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "X: {}  O: {}  Draws: {} (streak {})",
            self.x_wins, self.o_wins, self.draws, self.consecutive_draws
        )
    }
}

/// Anything that can pick the next square for one side.
pub trait MoveSource {
    /// Chooses a square for `round.to_move()`.
    fn next_move(&mut self, round: &Round) -> anyhow::Result<Position>;

    /// Name shown in logs and prompts.
    fn name(&self) -> &str;
}

/// The engine as a player.
#[derive(Debug, Clone, derive_new::new)]
pub struct ComputerPlayer {
    #[new(into)]
    name: String,
    searcher: Searcher,
}

impl MoveSource for ComputerPlayer {
    fn next_move(&mut self, round: &Round) -> anyhow::Result<Position> {
        let report = self.searcher.search(round.board())?;
        debug!(
            ai = %self.name,
            position = %report.best_move(),
            score = report.score(),
            nodes = report.stats().nodes,
            "AI chose position"
        );
        Ok(*report.best_move())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// A person typing moves into a terminal.
pub struct TerminalPlayer<R, W> {
    name: String,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalPlayer<R, W> {
    /// Creates a terminal player reading from `input` and prompting on `output`.
    pub fn new(name: impl Into<String>, input: R, output: W) -> Self {
        Self {
            name: name.into(),
            input,
            output,
        }
    }
}

impl<R: BufRead, W: Write> MoveSource for TerminalPlayer<R, W> {
    fn next_move(&mut self, round: &Round) -> anyhow::Result<Position> {
        loop {
            write!(
                self.output,
                "{} ({}), choose a square [1-9 or name]: ",
                self.name,
                round.to_move()
            )?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                anyhow::bail!("Input closed before {} moved", self.name);
            }

            match Position::from_label_or_number(&line) {
                Some(pos) if round.board().is_empty(pos) => return Ok(pos),
                Some(pos) => writeln!(self.output, "{} is taken.", pos)?,
                None => writeln!(self.output, "Unrecognised square {:?}.", line.trim())?,
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Replays a fixed list of squares.
#[derive(Debug, Clone)]
pub struct ScriptedPlayer {
    name: String,
    moves: VecDeque<Position>,
}

impl ScriptedPlayer {
    /// Creates a player that plays `moves` in order.
    pub fn new(name: impl Into<String>, moves: impl IntoIterator<Item = Position>) -> Self {
        Self {
            name: name.into(),
            moves: moves.into_iter().collect(),
        }
    }
}

impl MoveSource for ScriptedPlayer {
    fn next_move(&mut self, _round: &Round) -> anyhow::Result<Position> {
        self.moves
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("{} has no moves left", self.name))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Who picks moves for each side.
enum Seats<'a> {
    /// Separate sources for X and O.
    Split {
        x: &'a mut dyn MoveSource,
        o: &'a mut dyn MoveSource,
    },
    /// One source for both sides, e.g. two people at one keyboard.
    Shared(&'a mut dyn MoveSource),
}

impl Seats<'_> {
    fn source(&mut self, player: Player) -> &mut dyn MoveSource {
        match self {
            Seats::Split { x, .. } if player == Player::X => &mut **x,
            Seats::Split { o, .. } => &mut **o,
            Seats::Shared(source) => &mut **source,
        }
    }

    fn names(&self) -> (&str, &str) {
        match self {
            Seats::Split { x, o } => (x.name(), o.name()),
            Seats::Shared(source) => (source.name(), source.name()),
        }
    }
}

/// Runs rounds between move sources and keeps the score.
pub struct Match<'a, W> {
    seats: Seats<'a>,
    scoreboard: Scoreboard,
    out: W,
}

impl<'a, W: Write> Match<'a, W> {
    /// Seats `x` and `o` and reports progress to `out`.
    pub fn new(x: &'a mut dyn MoveSource, o: &'a mut dyn MoveSource, out: W) -> Self {
        Self {
            seats: Seats::Split { x, o },
            scoreboard: Scoreboard::default(),
            out,
        }
    }

    /// Lets one source move for both sides.
    pub fn hot_seat(source: &'a mut dyn MoveSource, out: W) -> Self {
        Self {
            seats: Seats::Shared(source),
            scoreboard: Scoreboard::default(),
            out,
        }
    }

    /// Score so far.
    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    /// Plays one round to completion and records it.
    #[instrument(skip(self), fields(x = %self.seats.names().0, o = %self.seats.names().1))]
    pub fn play_round(&mut self) -> anyhow::Result<Round> {
        let mut round = Round::new();
        writeln!(self.out, "{}\n", round.board())?;

        while !round.outcome().is_terminal() {
            let player = *round.to_move();
            let position = self.seats.source(player).next_move(&round)?;
            round.play(position)?;
            writeln!(self.out, "{} plays {}\n{}\n", player, position, round.board())?;
        }

        let outcome = *round.outcome();
        self.scoreboard.record(outcome);
        writeln!(self.out, "{}\n{}", outcome, self.scoreboard)?;
        info!(%outcome, moves = round.history().len(), "Round finished");
        Ok(round)
    }

    /// Plays `rounds` rounds and returns the final tally.
    pub fn play(&mut self, rounds: u32) -> anyhow::Result<Scoreboard> {
        for n in 1..=rounds {
            writeln!(self.out, "== Round {} ==", n)?;
            self.play_round()?;
        }
        Ok(self.scoreboard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noughts::SearchConfig;
    use std::io::Cursor;

    fn engine(player: Player) -> ComputerPlayer {
        ComputerPlayer::new(
            format!("engine-{}", player),
            Searcher::new(SearchConfig::default().with_automated(player)),
        )
    }

    #[test]
    fn test_round_alternates_and_records_history() {
        let mut round = Round::new();
        assert_eq!(round.play(Position::Center), Ok(Outcome::Ongoing));
        assert_eq!(*round.to_move(), Player::O);
        assert_eq!(round.play(Position::TopLeft), Ok(Outcome::Ongoing));
        assert_eq!(*round.to_move(), Player::X);
        assert_eq!(
            round.history(),
            &[
                Move {
                    player: Player::X,
                    position: Position::Center
                },
                Move {
                    player: Player::O,
                    position: Position::TopLeft
                },
            ]
        );
    }

    #[test]
    fn test_round_rejects_occupied_square() {
        let mut round = Round::new();
        round.play(Position::Center).unwrap();
        let before = *round.board();
        assert_eq!(
            round.play(Position::Center),
            Err(MoveError::SquareOccupied(Position::Center))
        );
        assert_eq!(*round.board(), before);
        assert_eq!(*round.to_move(), Player::O);
    }

    #[test]
    fn test_round_stops_after_win() {
        let mut round = Round::new();
        for pos in [
            Position::TopLeft,
            Position::MiddleLeft,
            Position::TopCenter,
            Position::Center,
        ] {
            round.play(pos).unwrap();
        }
        assert_eq!(round.play(Position::TopRight), Ok(Outcome::Win(Player::X)));
        assert_eq!(
            round.play(Position::BottomRight),
            Err(MoveError::RoundOver(Outcome::Win(Player::X)))
        );
    }

    #[test]
    fn test_scoreboard_streak_resets_on_win() {
        let mut score = Scoreboard::default();
        score.record(Outcome::Draw);
        score.record(Outcome::Draw);
        assert_eq!(*score.consecutive_draws(), 2);
        score.record(Outcome::Win(Player::O));
        assert_eq!(*score.consecutive_draws(), 0);
        score.record(Outcome::Ongoing);
        assert_eq!(score.rounds(), 3);
        assert_eq!(*score.o_wins(), 1);
        assert_eq!(*score.draws(), 2);
    }

    #[test]
    fn test_engine_blocks_scripted_player() {
        // X goes for the top row; the engine must block at TopRight
        let mut human = ScriptedPlayer::new(
            "script",
            [Position::TopLeft, Position::TopCenter, Position::BottomLeft],
        );
        let mut computer = engine(Player::O);
        let mut out = Vec::new();
        let mut game = Match::new(&mut human, &mut computer, &mut out);

        // The script runs out before the round ends
        assert!(game.play_round().is_err());
        let log = String::from_utf8(out).unwrap();
        assert!(log.contains("O plays Center"));
        assert!(log.contains("O plays Top-right"));
    }

    #[test]
    fn test_engine_self_play_draws() {
        let mut x = engine(Player::X);
        let mut o = engine(Player::O);
        let mut game = Match::new(&mut x, &mut o, std::io::sink());
        let score = game.play(2).unwrap();
        assert_eq!(*score.draws(), 2);
        assert_eq!(*score.consecutive_draws(), 2);
    }

    #[test]
    fn test_engine_punishes_blunder() {
        // X ignores O's threats and loses
        let mut human = ScriptedPlayer::new(
            "script",
            [
                Position::TopCenter,
                Position::BottomCenter,
                Position::MiddleRight,
                Position::BottomRight,
            ],
        );
        let mut computer = engine(Player::O);
        let mut game = Match::new(&mut human, &mut computer, std::io::sink());
        let round = game.play_round().unwrap();
        assert_eq!(*round.outcome(), Outcome::Win(Player::O));
        assert_eq!(*game.scoreboard().o_wins(), 1);
    }

    #[test]
    fn test_terminal_player_reprompts() {
        let mut round = Round::new();
        round.play(Position::Center).unwrap();
        let input = Cursor::new("five\n5\ntop-left\n");
        let mut prompts = Vec::new();
        let mut player = TerminalPlayer::new("human", input, &mut prompts);
        assert_eq!(player.next_move(&round).unwrap(), Position::TopLeft);
        let text = String::from_utf8(prompts).unwrap();
        assert!(text.contains("Unrecognised square \"five\""));
        assert!(text.contains("Center is taken"));
    }

    #[test]
    fn test_hot_seat_plays_both_sides() {
        // X takes the left column while O wanders
        let mut both = ScriptedPlayer::new(
            "table",
            [
                Position::TopLeft,
                Position::TopCenter,
                Position::MiddleLeft,
                Position::Center,
                Position::BottomLeft,
            ],
        );
        let mut game = Match::hot_seat(&mut both, std::io::sink());
        let round = game.play_round().unwrap();
        assert_eq!(*round.outcome(), Outcome::Win(Player::X));
        assert_eq!(round.history().len(), 5);
    }

    #[test]
    fn test_terminal_player_eof() {
        let round = Round::new();
        let mut player = TerminalPlayer::new("human", Cursor::new(""), std::io::sink());
        assert!(player.next_move(&round).is_err());
    }
}
