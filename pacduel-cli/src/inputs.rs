//! Shared loading of mazes and rule sets for all commands

use std::path::Path;

use anyhow::{Context, Result};

use pacduel_core::{default_board, load_board, Board, RuleSet};

/// Maze from a file, or the bundled one
pub fn load_maze(path: Option<&Path>) -> Result<Board> {
    match path {
        Some(path) => load_board(path),
        None => default_board().context("bundled maze is malformed"),
    }
}

/// Rule set from a file, or the defaults; checked against `board`
pub fn load_rules(path: Option<&Path>, board: &Board) -> Result<RuleSet> {
    let rules = match path {
        Some(path) => RuleSet::load(path)?,
        None => RuleSet::default(),
    };
    rules
        .check_against(board)
        .with_context(|| format!("rule set '{}' does not fit the maze", rules.name))?;
    Ok(rules)
}
