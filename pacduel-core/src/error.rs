//! Error types for board access and maze parsing
//!
//! Rule violations are not errors: they are reported as
//! `MazeValidationOutcome` / `TurnOutcome` values. These variants cover
//! broken invariants and malformed maze text only.

use thiserror::Error;

use crate::board::{Coordinate, Symbol};

/// Board invariant violations and maze text codec failures
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("coordinate ({row}, {col}) is outside a {width}x{height} board")]
    OutOfRange {
        row: usize,
        col: usize,
        width: usize,
        height: usize,
    },

    #[error("symbol {0:?} not found on board")]
    SymbolNotFound(Symbol),

    #[error("symbol {symbol:?} found {count} times, expected exactly one")]
    AmbiguousSymbol { symbol: Symbol, count: usize },

    #[error("board dimensions differ: {left_width}x{left_height} vs {right_width}x{right_height}")]
    DimensionMismatch {
        left_width: usize,
        left_height: usize,
        right_width: usize,
        right_height: usize,
    },

    #[error("unknown maze character {ch:?} at row {row}, column {col}")]
    UnknownSymbol { ch: char, row: usize, col: usize },

    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("maze text contains no rows")]
    EmptyMaze,

    #[error("respawn cell and every holding cell are taken; nowhere to put {0:?}")]
    NoHoldingCell(Symbol),
}

/// Rule parameters that cannot be applied to a given maze
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("respawn cell {0:?} is outside the maze")]
    RespawnOutOfRange(Coordinate),

    #[error("respawn cell {0:?} is a wall")]
    RespawnOnWall(Coordinate),

    #[error("holding cell {0:?} must be open and walled in on every side")]
    HoldingCellNotEnclosed(Coordinate),

    #[error("need a holding cell for each agent, found {0}")]
    TooFewHoldingCells(usize),

    #[error(transparent)]
    Board(#[from] BoardError),
}
