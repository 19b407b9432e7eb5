//! Game state and the per-ply match loop
//!
//! The board is always canonical: the agent to move is labeled `PlayerA`.
//! After every accepted ply the labels are swapped so the next mover is
//! `PlayerA` in turn.

use serde::{Deserialize, Serialize};

use crate::agent::{AgentState, Player};
use crate::board::{Board, Coordinate, Direction, Symbol};
use crate::error::BoardError;
use crate::rules::RuleSet;
use crate::turn::{resolve_turn, TurnOutcome};
use crate::validator::{infer_move, MazeValidationOutcome};

// ============================================================================
// CORE TYPES
// ============================================================================

/// One of the eight move shapes an agent can submit
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveCandidate {
    pub direction: Direction,
    pub drop_poison_pill: bool,
}

impl MoveCandidate {
    /// Enumeration order: directions, then no-drop before drop
    pub const ALL: [MoveCandidate; 8] = [
        MoveCandidate::new(Direction::Up, false),
        MoveCandidate::new(Direction::Up, true),
        MoveCandidate::new(Direction::Down, false),
        MoveCandidate::new(Direction::Down, true),
        MoveCandidate::new(Direction::Left, false),
        MoveCandidate::new(Direction::Left, true),
        MoveCandidate::new(Direction::Right, false),
        MoveCandidate::new(Direction::Right, true),
    ];

    pub const fn new(direction: Direction, drop_poison_pill: bool) -> Self {
        Self {
            direction,
            drop_poison_pill,
        }
    }
}

/// Result of feeding one candidate maze to the match loop
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Ply {
    /// Legal ply; `state` is canonical for the next mover
    Accepted {
        state: GameState,
        outcome: TurnOutcome,
        points: u32,
        /// The opponent was put back on the board after a kill, or moved
        /// from a holding cell onto the respawn cell
        regenerated: bool,
    },
    /// Candidate does not describe a single step
    InvalidMaze(MazeValidationOutcome),
    /// Single step, but against the rules
    IllegalTurn(TurnOutcome),
}

/// A legal move together with the board an agent would submit for it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LegalMove {
    pub candidate: MoveCandidate,
    pub board: Board,
    pub outcome: TurnOutcome,
    pub points: u32,
}

/// Full game state between plies
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub board: Board,
    pub mover: AgentState,
    pub opponent: AgentState,
    /// Accepted plies so far
    pub ply: u32,
}

// ============================================================================
// GAME STATE
// ============================================================================

impl GameState {
    /// Start a game; the agent on `PlayerA` moves first
    pub fn new(
        board: Board,
        first: impl Into<String>,
        second: impl Into<String>,
        rules: &RuleSet,
    ) -> Result<Self, BoardError> {
        let a = board.find_coordinate_of(Symbol::PlayerA)?;
        let b = board.find_coordinate_of(Symbol::PlayerB)?;
        Ok(Self {
            board,
            mover: AgentState::new(first, Player::A, a, rules.poison_pills),
            opponent: AgentState::new(second, Player::B, b, rules.poison_pills),
            ply: 0,
        })
    }

    /// Board the mover would submit for `candidate`.
    ///
    /// `None` when the step leaves the grid vertically. Walls are not
    /// filtered here; the validator rejects them.
    pub fn candidate_board(&self, candidate: MoveCandidate) -> Result<Option<Board>, BoardError> {
        let from = self.mover.position;
        let Some(to) = from.step(candidate.direction, self.board.width(), self.board.height()) else {
            return Ok(None);
        };

        let vacated = if candidate.drop_poison_pill {
            Symbol::PoisonPill
        } else {
            Symbol::Empty
        };
        let board = self
            .board
            .with_symbol(from, vacated)?
            .with_symbol(to, Symbol::PlayerA)?;
        Ok(Some(board))
    }

    /// Run one ply of the match loop on a submitted maze
    pub fn advance(&self, candidate: &Board, rules: &RuleSet) -> Result<Ply, BoardError> {
        let step = match infer_move(candidate, &self.board)? {
            Ok(step) => step,
            Err(outcome) => return Ok(Ply::InvalidMaze(outcome)),
        };

        let resolution = resolve_turn(
            rules,
            candidate,
            &self.board,
            step.target,
            step.from,
            self.opponent.position,
            &self.mover,
        )?;
        if !resolution.outcome.is_legal() {
            return Ok(Ply::IllegalTurn(resolution.outcome));
        }

        // Positions come from the board, not from the move
        let board = resolution.board;
        let mover_at = board.find_coordinate_of(Symbol::PlayerA)?;
        let (board, regenerated) =
            regenerate_opponent_if_dead(board.locate(Symbol::PlayerB)?, &board, rules)?;
        let opponent_at = board.find_coordinate_of(Symbol::PlayerB)?;

        let next = GameState {
            board: board.swap_player_symbols(),
            mover: self.opponent.relabeled(opponent_at),
            opponent: resolution.mover.relabeled(mover_at),
            ply: self.ply + 1,
        };

        Ok(Ply::Accepted {
            state: next,
            outcome: resolution.outcome,
            points: resolution.points,
            regenerated,
        })
    }

    /// Every accepted candidate, in enumeration order
    pub fn legal_moves(&self, rules: &RuleSet) -> Result<Vec<LegalMove>, BoardError> {
        let mut moves = Vec::new();
        for candidate in MoveCandidate::ALL {
            let Some(board) = self.candidate_board(candidate)? else {
                continue;
            };
            if let Ply::Accepted { outcome, points, .. } = self.advance(&board, rules)? {
                moves.push(LegalMove {
                    candidate,
                    board,
                    outcome,
                    points,
                });
            }
        }
        Ok(moves)
    }
}

/// Bring a dead opponent back.
///
/// `opponent_position` is `None` right after the opponent was run over; it
/// is then placed like any dead agent, on the respawn cell or in a holding
/// cell. An opponent already waiting in a holding cell moves onto the
/// respawn cell once that cell is Empty.
pub fn regenerate_opponent_if_dead(
    opponent_position: Option<Coordinate>,
    board: &Board,
    rules: &RuleSet,
) -> Result<(Board, bool), BoardError> {
    let respawn = rules.respawn.point;
    match opponent_position {
        None => {
            let (board, _) = rules.respawn.place(board, Symbol::PlayerB)?;
            Ok((board, true))
        }
        Some(at) if rules.respawn.is_holding(at) && board.symbol_at(respawn)? == Symbol::Empty => {
            let board = board
                .with_symbol(at, Symbol::Empty)?
                .with_symbol(respawn, Symbol::PlayerB)?;
            Ok((board, true))
        }
        Some(_) => Ok((board.clone(), false)),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::{default_board, HOLDING_CELLS, PLAYER_A_START, PLAYER_B_START};
    use crate::rules::KillRule;

    fn initial() -> GameState {
        GameState::new(default_board().unwrap(), "first", "second", &RuleSet::default()).unwrap()
    }

    fn accepted(ply: Ply) -> GameState {
        match ply {
            Ply::Accepted { state, .. } => state,
            other => panic!("expected accepted ply, got {:?}", other),
        }
    }

    #[test]
    fn test_initial_state() {
        let game = initial();
        assert_eq!(game.mover.position, PLAYER_A_START);
        assert_eq!(game.opponent.position, PLAYER_B_START);
        assert_eq!(game.mover.poison_pills, 1);
        assert_eq!(game.ply, 0);
    }

    #[test]
    fn test_opening_moves() {
        let game = initial();
        let moves = game.legal_moves(&RuleSet::default()).unwrap();
        // Left and right along row 16, with and without a drop
        assert_eq!(moves.len(), 4);
        assert!(moves.iter().all(|m| m.candidate.direction == Direction::Left
            || m.candidate.direction == Direction::Right));
        assert!(moves.iter().all(|m| m.outcome.is_legal()));
    }

    #[test]
    fn test_advance_swaps_roles() {
        let rules = RuleSet::default();
        let game = initial();
        let candidate = game
            .candidate_board(MoveCandidate::new(Direction::Left, false))
            .unwrap()
            .unwrap();
        let next = accepted(game.advance(&candidate, &rules).unwrap());

        assert_eq!(next.ply, 1);
        assert_eq!(next.mover.name, "second");
        assert_eq!(next.opponent.name, "first");
        assert_eq!(next.mover.position, PLAYER_B_START);
        assert_eq!(next.opponent.position, Coordinate::new(16, 8));
        assert_eq!(next.opponent.score, 1);
        assert_eq!(next.board.find_coordinate_of(Symbol::PlayerA), Ok(PLAYER_B_START));
        assert_eq!(next.board.find_coordinate_of(Symbol::PlayerB), Ok(Coordinate::new(16, 8)));
    }

    #[test]
    fn test_rejected_ply_leaves_state() {
        let rules = RuleSet::default();
        let game = initial();
        let candidate = game
            .candidate_board(MoveCandidate::new(Direction::Up, false))
            .unwrap()
            .unwrap();
        assert_eq!(
            game.advance(&candidate, &rules).unwrap(),
            Ply::InvalidMaze(MazeValidationOutcome::InvalidMazeWallTarget)
        );
    }

    #[test]
    fn test_second_drop_is_illegal() {
        let rules = RuleSet::default();
        let mut game = initial();
        game.mover.poison_pills = 0;
        let candidate = game
            .candidate_board(MoveCandidate::new(Direction::Left, true))
            .unwrap()
            .unwrap();
        assert_eq!(
            game.advance(&candidate, &rules).unwrap(),
            Ply::IllegalTurn(TurnOutcome::MoveMadeAndDroppedPoisonPillIllegally)
        );
    }

    #[test]
    fn test_regenerate_noop_when_alive() {
        let board = default_board().unwrap();
        let (same, regenerated) =
            regenerate_opponent_if_dead(Some(PLAYER_B_START), &board, &RuleSet::default()).unwrap();
        assert!(!regenerated);
        assert_eq!(same, board);
    }

    #[test]
    fn test_regenerate_after_kill() {
        let rules = RuleSet::default().with_kill_rule(KillRule::OutsideRespawnZone);
        // Mover directly below the opponent, outside the respawn zone
        let board = default_board()
            .unwrap()
            .with_symbol(PLAYER_A_START, Symbol::Pellet)
            .and_then(|b| b.with_symbol(Coordinate::new(4, 8), Symbol::PlayerA))
            .unwrap();
        let game = GameState::new(board, "first", "second", &rules).unwrap();
        let before = game.opponent.position;

        let candidate = game
            .candidate_board(MoveCandidate::new(Direction::Right, false))
            .unwrap()
            .unwrap();
        match game.advance(&candidate, &rules).unwrap() {
            Ply::Accepted { state, outcome, regenerated, .. } => {
                assert_eq!(outcome, TurnOutcome::MoveMadeAndKilledOpponent);
                assert!(regenerated);
                let after = state.board.find_coordinate_of(Symbol::PlayerA).unwrap();
                assert_eq!(after, state.mover.position);
                assert_ne!(after, before);
                assert_eq!(after, rules.respawn.point);
                assert_eq!(default_board().unwrap().symbol_at(after), Ok(Symbol::Empty));
            }
            other => panic!("expected accepted ply, got {:?}", other),
        }
    }

    #[test]
    fn test_regenerate_blocked_by_pill_holds_opponent() {
        let rules = RuleSet::default();
        let board = default_board()
            .unwrap()
            .with_symbol(PLAYER_B_START, Symbol::Pellet)
            .and_then(|b| b.with_symbol(rules.respawn.point, Symbol::PoisonPill))
            .unwrap();
        let (held, regenerated) = regenerate_opponent_if_dead(None, &board, &rules).unwrap();
        assert!(regenerated);
        assert_eq!(held.find_coordinate_of(Symbol::PlayerB), Ok(HOLDING_CELLS[0]));

        // Still blocked: stays put
        let (same, regenerated) =
            regenerate_opponent_if_dead(Some(HOLDING_CELLS[0]), &held, &rules).unwrap();
        assert!(!regenerated);
        assert_eq!(same, held);

        // Cleared: moves onto the respawn cell
        let cleared = held.with_symbol(rules.respawn.point, Symbol::Empty).unwrap();
        let (back, regenerated) =
            regenerate_opponent_if_dead(Some(HOLDING_CELLS[0]), &cleared, &rules).unwrap();
        assert!(regenerated);
        assert_eq!(back.find_coordinate_of(Symbol::PlayerB), Ok(rules.respawn.point));
        assert_eq!(back.symbol_at(HOLDING_CELLS[0]), Ok(Symbol::Empty));
    }

    #[test]
    fn test_held_mover_has_no_legal_moves() {
        let rules = RuleSet::default();
        let board = default_board()
            .unwrap()
            .with_symbol(PLAYER_A_START, Symbol::Pellet)
            .and_then(|b| b.with_symbol(HOLDING_CELLS[1], Symbol::PlayerA))
            .unwrap();
        let game = GameState::new(board, "first", "second", &rules).unwrap();
        assert_eq!(game.mover.position, HOLDING_CELLS[1]);
        assert!(game.legal_moves(&rules).unwrap().is_empty());
    }
}
