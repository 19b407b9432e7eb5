//! Configuration types for match play
//!
//! Level 4 - Utilities and configuration

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Built-in agent implementations
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentKind {
    /// Uniform over legal moves
    Random,
    /// Highest immediate score, never walks into a pill
    Greedy,
}

impl Default for AgentKind {
    fn default() -> Self {
        AgentKind::Greedy
    }
}

impl std::str::FromStr for AgentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "random" => Ok(AgentKind::Random),
            "greedy" => Ok(AgentKind::Greedy),
            other => Err(format!("unknown agent kind '{}' (expected random or greedy)", other)),
        }
    }
}

/// Match configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Number of games (first move alternates)
    pub games: usize,
    /// Hard cap on accepted plies per game
    pub max_plies: u32,
    /// Consecutive plies without points before the game is called
    pub max_idle_plies: u32,
    /// Whether to run games in parallel
    pub parallel: bool,
    /// Random seed for reproducibility (None = 42)
    pub seed: Option<u64>,
    pub agent_a: AgentKind,
    pub agent_b: AgentKind,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            games: 10,
            max_plies: 1000,
            max_idle_plies: 200,
            parallel: true,
            seed: None,
            agent_a: AgentKind::Greedy,
            agent_b: AgentKind::Random,
        }
    }
}

impl MatchConfig {
    /// Create config for `games` games
    pub fn new(games: usize) -> Self {
        Self {
            games,
            ..Default::default()
        }
    }

    /// Set the two agents
    pub fn with_agents(mut self, agent_a: AgentKind, agent_b: AgentKind) -> Self {
        self.agent_a = agent_a;
        self.agent_b = agent_b;
        self
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Run games one after another
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    pub fn base_seed(&self) -> u64 {
        self.seed.unwrap_or(42)
    }

    /// Load from JSON file; missing fields take their defaults
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading match config {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("parsing match config {}", path.display()))?;
        Ok(config)
    }
}
