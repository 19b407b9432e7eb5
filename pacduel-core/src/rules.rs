//! RuleSet - tunable rule parameters
//!
//! Everything the referee does not derive from the board itself lives
//! here: the scoring tariff, where dead agents come back, when running
//! into the opponent is a kill, and how many poison pills each agent gets.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Coordinate, Direction, Symbol};
use crate::error::{BoardError, RulesError};
use crate::maze::HOLDING_CELLS;

/// Points per eaten item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scoring {
    pub pellet: u32,
    pub power_pellet: u32,
}

impl Default for Scoring {
    fn default() -> Self {
        Self {
            pellet: 1,
            power_pellet: 10,
        }
    }
}

/// Where dead agents reappear
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RespawnZone {
    /// Cell a regenerated agent is placed on
    pub point: Coordinate,
    /// Cells where an agent cannot be killed
    pub safe_cells: Vec<Coordinate>,
    /// Walled-in cells where a dead agent waits while `point` is taken
    pub holding_cells: Vec<Coordinate>,
}

impl Default for RespawnZone {
    fn default() -> Self {
        Self {
            point: Coordinate::new(10, 9),
            safe_cells: vec![
                Coordinate::new(9, 9),
                Coordinate::new(10, 9),
                Coordinate::new(11, 9),
            ],
            holding_cells: HOLDING_CELLS.to_vec(),
        }
    }
}

impl RespawnZone {
    pub fn is_holding(&self, at: Coordinate) -> bool {
        self.holding_cells.contains(&at)
    }

    /// Put a dead agent's symbol back on the board.
    ///
    /// The respawn point is used when it is Empty; otherwise the agent goes
    /// to the first Empty holding cell and waits there.
    pub fn place(&self, board: &Board, symbol: Symbol) -> Result<(Board, Coordinate), BoardError> {
        if board.symbol_at(self.point)? == Symbol::Empty {
            return Ok((board.with_symbol(self.point, symbol)?, self.point));
        }
        for &cell in &self.holding_cells {
            if board.symbol_at(cell)? == Symbol::Empty {
                return Ok((board.with_symbol(cell, symbol)?, cell));
            }
        }
        Err(BoardError::NoHoldingCell(symbol))
    }
}

/// Whether moving onto the opponent kills it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum KillRule {
    /// Always a kill
    Anywhere,
    /// A kill, except on the respawn zone's safe cells where the move is illegal
    OutsideRespawnZone,
    /// Never allowed
    Never,
}

impl Default for KillRule {
    fn default() -> Self {
        KillRule::OutsideRespawnZone
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    pub name: String,
    pub scoring: Scoring,
    pub respawn: RespawnZone,
    pub kill_rule: KillRule,
    /// Pills each agent starts with
    pub poison_pills: u8,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            name: "classic".to_string(),
            scoring: Scoring::default(),
            respawn: RespawnZone::default(),
            kill_rule: KillRule::default(),
            poison_pills: 1,
        }
    }
}

impl RuleSet {
    /// Points for eating whatever was on a cell
    pub fn points_for(&self, eaten: Symbol) -> u32 {
        match eaten {
            Symbol::Pellet => self.scoring.pellet,
            Symbol::PowerPellet => self.scoring.power_pellet,
            _ => 0,
        }
    }

    /// Check whether moving onto the opponent at `at` is a legal kill
    pub fn kill_allowed(&self, at: Coordinate) -> bool {
        match self.kill_rule {
            KillRule::Anywhere => true,
            KillRule::OutsideRespawnZone => !self.respawn.safe_cells.contains(&at),
            KillRule::Never => false,
        }
    }

    pub fn with_kill_rule(mut self, kill_rule: KillRule) -> Self {
        self.kill_rule = kill_rule;
        self
    }

    pub fn with_scoring(mut self, pellet: u32, power_pellet: u32) -> Self {
        self.scoring = Scoring { pellet, power_pellet };
        self
    }

    pub fn with_poison_pills(mut self, poison_pills: u8) -> Self {
        self.poison_pills = poison_pills;
        self
    }

    /// Check that the respawn cells fit the maze.
    ///
    /// A holding cell may already be occupied by a waiting agent.
    pub fn check_against(&self, board: &Board) -> Result<(), RulesError> {
        let point = self.respawn.point;
        if point.row >= board.height() || point.col >= board.width() {
            return Err(RulesError::RespawnOutOfRange(point));
        }
        if board.symbol_at(point)? == Symbol::Wall {
            return Err(RulesError::RespawnOnWall(point));
        }
        for &cell in &self.respawn.safe_cells {
            if cell.row >= board.height() || cell.col >= board.width() {
                return Err(RulesError::RespawnOutOfRange(cell));
            }
        }
        if self.respawn.holding_cells.len() < 2 {
            return Err(RulesError::TooFewHoldingCells(self.respawn.holding_cells.len()));
        }
        for &cell in &self.respawn.holding_cells {
            if cell.row >= board.height() || cell.col >= board.width() {
                return Err(RulesError::RespawnOutOfRange(cell));
            }
            let walled_in = Direction::ALL
                .into_iter()
                .filter_map(|d| cell.step(d, board.width(), board.height()))
                .all(|next| board.symbol_at(next) == Ok(Symbol::Wall));
            if board.symbol_at(cell)? == Symbol::Wall || !walled_in {
                return Err(RulesError::HoldingCellNotEnclosed(cell));
            }
        }
        Ok(())
    }

    /// Load from JSON file; missing fields take their defaults
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading rules {}", path.display()))?;
        let rules: RuleSet = serde_json::from_str(&content)
            .with_context(|| format!("parsing rules {}", path.display()))?;
        Ok(rules)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
