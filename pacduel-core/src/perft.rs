//! Perft - exhaustive node counting over the match loop
//!
//! Each position tries the eight `MoveCandidate::ALL` shapes in order and
//! recurses into every accepted ply. Rejected candidates contribute 0.
//! Depth 0 counts as one leaf. Every branch owns its own board, so
//! siblings never see each other's moves.

use thiserror::Error;

use crate::error::BoardError;
use crate::game::{GameState, MoveCandidate, Ply};
use crate::rules::RuleSet;

/// Node counts from the bundled maze with default rules, indexed by depth
pub const REFERENCE_NODE_COUNTS: [u64; 21] = [
    1,
    4,
    16,
    72,
    324,
    864,
    2296,
    7600,
    25167,
    59456,
    140254,
    436578,
    1357407,
    3104512,
    7092442,
    21487688,
    65032362,
    146216759,
    328439363,
    978711725,
    2913883204,
];

#[derive(Debug, Error)]
pub enum PerftError {
    #[error("perft({depth}) = {actual}, expected {expected}")]
    Mismatch { depth: u32, expected: u64, actual: u64 },

    #[error("no reference count for depth {depth}")]
    NoReference { depth: u32 },

    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Count leaves `depth` plies below `state`
pub fn count_nodes(state: &GameState, rules: &RuleSet, depth: u32) -> Result<u64, BoardError> {
    if depth == 0 {
        return Ok(1);
    }

    let mut nodes = 0;
    for candidate in MoveCandidate::ALL {
        let Some(board) = state.candidate_board(candidate)? else {
            continue;
        };
        if let Ply::Accepted { state: child, .. } = state.advance(&board, rules)? {
            nodes += count_nodes(&child, rules, depth - 1)?;
        }
    }
    Ok(nodes)
}

/// Per-root-move breakdown of `count_nodes`, for accepted moves only
pub fn divide(
    state: &GameState,
    rules: &RuleSet,
    depth: u32,
) -> Result<Vec<(MoveCandidate, u64)>, BoardError> {
    if depth == 0 {
        return Ok(Vec::new());
    }

    let mut split = Vec::new();
    for candidate in MoveCandidate::ALL {
        let Some(board) = state.candidate_board(candidate)? else {
            continue;
        };
        if let Ply::Accepted { state: child, .. } = state.advance(&board, rules)? {
            split.push((candidate, count_nodes(&child, rules, depth - 1)?));
        }
    }
    Ok(split)
}

/// Expected count for `depth`, if known
pub fn reference_count(depth: u32) -> Option<u64> {
    REFERENCE_NODE_COUNTS.get(depth as usize).copied()
}

/// Compare one depth against the reference table
pub fn check_depth(depth: u32, actual: u64) -> Result<(), PerftError> {
    let expected = reference_count(depth).ok_or(PerftError::NoReference { depth })?;
    if expected != actual {
        return Err(PerftError::Mismatch { depth, expected, actual });
    }
    Ok(())
}

/// Count depths `0..=max_depth` and fail on the first mismatch
pub fn verify(state: &GameState, rules: &RuleSet, max_depth: u32) -> Result<Vec<u64>, PerftError> {
    let mut counts = Vec::with_capacity(max_depth as usize + 1);
    for depth in 0..=max_depth {
        let actual = count_nodes(state, rules, depth)?;
        check_depth(depth, actual)?;
        counts.push(actual);
    }
    Ok(counts)
}
