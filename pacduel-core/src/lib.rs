//! PACDUEL Core - Referee for a two-agent Pac-Man maze duel
//!
//! This crate provides the rules engine:
//! - Board snapshots on a cylinder (columns wrap, rows do not)
//! - Diff-based validation of submitted mazes
//! - Turn resolution (scoring, poison pills, deaths, kills)
//! - The per-ply match loop with respawn and symbol swapping
//! - Perft node counting against reference totals

pub mod agent;
pub mod board;
pub mod error;
pub mod game;
pub mod maze;
pub mod perft;
pub mod rules;
pub mod turn;
pub mod validator;

// Re-exports for convenient access
pub use agent::{AgentState, Player};
pub use board::{Board, CellChange, Coordinate, Direction, Symbol};
pub use error::{BoardError, RulesError};
pub use game::{regenerate_opponent_if_dead, GameState, LegalMove, MoveCandidate, Ply};
pub use maze::{
    default_board, load_board, HOLDING_CELLS, MAZE_HEIGHT, MAZE_WIDTH, PLAYER_A_START, PLAYER_B_START,
};
pub use perft::{count_nodes, divide, PerftError, REFERENCE_NODE_COUNTS};
pub use rules::{KillRule, RuleSet};
pub use turn::{resolve_turn, TurnOutcome, TurnResolution};
pub use validator::{infer_move, validate_maze, InferredMove, MazeValidationOutcome};
