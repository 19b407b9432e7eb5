//! Game runner - referees a single game between two agents
//!
//! Level 3 - Step-level implementation

use pacduel_core::{BoardError, GameState, MazeValidationOutcome, Ply, RuleSet, TurnOutcome};
use serde::Serialize;

use crate::agents::{Agent, Submission};
use crate::config::MatchConfig;

/// Seat in a single game; `First` makes the opening move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Seat {
    First,
    Second,
}

impl Seat {
    pub fn other(self) -> Self {
        match self {
            Seat::First => Seat::Second,
            Seat::Second => Seat::First,
        }
    }

    fn index(self) -> usize {
        match self {
            Seat::First => 0,
            Seat::Second => 1,
        }
    }

    /// Seat to move after `ply` accepted plies
    fn to_move(ply: u32) -> Self {
        if ply % 2 == 0 {
            Seat::First
        } else {
            Seat::Second
        }
    }
}

/// Why a seat lost by forfeit
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ForfeitReason {
    InvalidMaze(MazeValidationOutcome),
    IllegalTurn(TurnOutcome),
    NoSubmission,
    Unreadable,
}

/// How a game ended
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum GameEnd {
    /// No pellets or power pellets left
    PelletsExhausted,
    /// Too many plies in a row without points
    IdleLimit,
    PlyLimit,
    /// The agent to move has no legal move (boxed in, or waiting in a holding cell)
    NoLegalMoves,
    Forfeit { seat: Seat, reason: ForfeitReason },
}

/// Everything reported about one finished game
#[derive(Clone, Debug, Serialize)]
pub struct GameRecord {
    pub end: GameEnd,
    /// `None` for a draw
    pub winner: Option<Seat>,
    /// Agent names, by seat
    pub names: [String; 2],
    /// Final scores, by seat
    pub scores: [u32; 2],
    pub plies: u32,
    /// Turn outcome of every accepted ply
    pub history: Vec<TurnOutcome>,
}

impl GameRecord {
    pub fn is_draw(&self) -> bool {
        self.winner.is_none()
    }

    pub fn score(&self, seat: Seat) -> u32 {
        self.scores[seat.index()]
    }

    pub fn name(&self, seat: Seat) -> &str {
        &self.names[seat.index()]
    }
}

/// Game runner that referees games with a fixed rule set
pub struct GameRunner<'a> {
    rules: &'a RuleSet,
    max_plies: u32,
    max_idle_plies: u32,
}

impl<'a> GameRunner<'a> {
    pub fn new(rules: &'a RuleSet, config: &MatchConfig) -> Self {
        Self {
            rules,
            max_plies: config.max_plies,
            max_idle_plies: config.max_idle_plies,
        }
    }

    /// Play one game to completion.
    ///
    /// `first` moves from the initial state's mover seat. Only broken board
    /// invariants are errors; every rule problem ends the game as a forfeit.
    pub fn play_game(
        &self,
        initial: GameState,
        first: &mut dyn Agent,
        second: &mut dyn Agent,
    ) -> Result<GameRecord, BoardError> {
        let mut state = initial;
        let mut history = Vec::new();
        let mut idle = 0u32;

        let end = loop {
            if let Some(end) = self.check_limits(&state, idle)? {
                break end;
            }

            let seat = Seat::to_move(state.ply);
            let agent: &mut dyn Agent = match seat {
                Seat::First => &mut *first,
                Seat::Second => &mut *second,
            };

            let board = match agent.submit(&state, self.rules) {
                Submission::Maze(board) => board,
                Submission::NoSubmission => break forfeit(seat, ForfeitReason::NoSubmission),
                Submission::Unreadable => break forfeit(seat, ForfeitReason::Unreadable),
            };

            match state.advance(&board, self.rules)? {
                Ply::Accepted { state: next, outcome, points, regenerated } => {
                    tracing::debug!(
                        "ply {}: {} {:?} (+{}){}",
                        state.ply,
                        agent.name(),
                        outcome,
                        points,
                        if regenerated { ", opponent respawned" } else { "" }
                    );
                    idle = if points > 0 { 0 } else { idle + 1 };
                    history.push(outcome);
                    state = next;
                }
                Ply::InvalidMaze(outcome) => {
                    break forfeit(seat, ForfeitReason::InvalidMaze(outcome));
                }
                Ply::IllegalTurn(outcome) => {
                    break forfeit(seat, ForfeitReason::IllegalTurn(outcome));
                }
            }
        };

        if let GameEnd::Forfeit { seat, reason } = end {
            tracing::warn!("{} forfeits at ply {}: {:?}", seat_name(seat, first, second), state.ply, reason);
        }

        let record = build_record(&state, end, history);
        tracing::debug!("game over after {} plies: {:?}", record.plies, record.end);
        Ok(record)
    }

    fn check_limits(&self, state: &GameState, idle: u32) -> Result<Option<GameEnd>, BoardError> {
        if state.board.pellets_remaining() == 0 {
            return Ok(Some(GameEnd::PelletsExhausted));
        }
        if state.ply >= self.max_plies {
            return Ok(Some(GameEnd::PlyLimit));
        }
        if idle >= self.max_idle_plies {
            return Ok(Some(GameEnd::IdleLimit));
        }
        if state.legal_moves(self.rules)?.is_empty() {
            return Ok(Some(GameEnd::NoLegalMoves));
        }
        Ok(None)
    }
}

// ============================================================================
// Level 4 - Utilities
// ============================================================================

fn forfeit(seat: Seat, reason: ForfeitReason) -> GameEnd {
    GameEnd::Forfeit { seat, reason }
}

fn seat_name<'a>(seat: Seat, first: &'a dyn Agent, second: &'a dyn Agent) -> &'a str {
    match seat {
        Seat::First => first.name(),
        Seat::Second => second.name(),
    }
}

/// Map the canonical mover/opponent back to seats and pick a winner
fn build_record(state: &GameState, end: GameEnd, history: Vec<TurnOutcome>) -> GameRecord {
    let mover_seat = Seat::to_move(state.ply);
    let (first, second) = match mover_seat {
        Seat::First => (&state.mover, &state.opponent),
        Seat::Second => (&state.opponent, &state.mover),
    };
    let scores = [first.score, second.score];

    let winner = match end {
        GameEnd::Forfeit { seat, .. } => Some(seat.other()),
        _ if scores[0] > scores[1] => Some(Seat::First),
        _ if scores[1] > scores[0] => Some(Seat::Second),
        _ => None,
    };

    GameRecord {
        end,
        winner,
        names: [first.name.clone(), second.name.clone()],
        scores,
        plies: state.ply,
        history,
    }
}
