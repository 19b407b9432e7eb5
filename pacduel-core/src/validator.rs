//! Move validator - proves a submitted maze is one step from the previous one
//!
//! The submission is a whole board, not a declared move. A candidate is
//! structurally valid iff exactly two cells differ:
//! - the mover's old cell, now Empty or PoisonPill
//! - an orthogonal neighbour of it (columns wrap) that now holds the mover
//!   and was not a Wall
//!
//! The mover is always `PlayerA` on the board being validated.

use serde::{Deserialize, Serialize};

use crate::board::{Board, CellChange, Coordinate, Direction, Symbol};
use crate::error::BoardError;

/// Structural verdict on a candidate maze
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MazeValidationOutcome {
    ValidMaze,
    /// Candidate has a different width or height
    InvalidMazeDimensions,
    /// Fewer than two cells changed
    InvalidMazeTooFewChanges,
    /// More than two cells changed
    InvalidMazeTooManyChanges,
    /// Mover's old cell unchanged, or not left Empty / PoisonPill
    InvalidMazeVacatedCell,
    /// The other changed cell does not hold the mover
    InvalidMazeMoveTarget,
    InvalidMazeNotAdjacent,
    InvalidMazeWallTarget,
}

impl MazeValidationOutcome {
    pub fn is_valid(self) -> bool {
        self == MazeValidationOutcome::ValidMaze
    }
}

/// The step a valid candidate encodes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InferredMove {
    pub from: Coordinate,
    pub target: Coordinate,
    pub direction: Direction,
    /// Vacated cell became a PoisonPill
    pub dropped_poison_pill: bool,
}

/// Classify `candidate` against `previous`.
///
/// Fails only when `previous` has no unique mover symbol.
pub fn validate_maze(candidate: &Board, previous: &Board) -> Result<MazeValidationOutcome, BoardError> {
    inspect(candidate, previous).map(|(outcome, _)| outcome)
}

/// The move a candidate encodes, or the reason it encodes none
pub fn infer_move(
    candidate: &Board,
    previous: &Board,
) -> Result<Result<InferredMove, MazeValidationOutcome>, BoardError> {
    let (outcome, inferred) = inspect(candidate, previous)?;
    Ok(inferred.ok_or(outcome))
}

fn inspect(
    candidate: &Board,
    previous: &Board,
) -> Result<(MazeValidationOutcome, Option<InferredMove>), BoardError> {
    use MazeValidationOutcome::*;

    if !candidate.same_dimensions(previous) {
        return Ok((InvalidMazeDimensions, None));
    }

    let changes = previous.diff(candidate)?;
    match changes.len() {
        0 | 1 => return Ok((InvalidMazeTooFewChanges, None)),
        2 => {}
        _ => return Ok((InvalidMazeTooManyChanges, None)),
    }

    let from = previous.find_coordinate_of(Symbol::PlayerA)?;

    let Some(vacated) = changes.iter().find(|c| c.at == from) else {
        return Ok((InvalidMazeVacatedCell, None));
    };
    if !matches!(vacated.new, Symbol::Empty | Symbol::PoisonPill) {
        return Ok((InvalidMazeVacatedCell, None));
    }

    let target: &CellChange = match changes.iter().find(|c| c.at != from) {
        Some(change) => change,
        None => return Ok((InvalidMazeMoveTarget, None)),
    };
    if target.new != Symbol::PlayerA {
        return Ok((InvalidMazeMoveTarget, None));
    }

    let Some(direction) = from.direction_to(target.at, previous.width(), previous.height()) else {
        return Ok((InvalidMazeNotAdjacent, None));
    };

    if target.old == Symbol::Wall {
        return Ok((InvalidMazeWallTarget, None));
    }

    let inferred = InferredMove {
        from,
        target: target.at,
        direction,
        dropped_poison_pill: vacated.new == Symbol::PoisonPill,
    };
    Ok((ValidMaze, Some(inferred)))
}
