//! Agents - sources of submitted mazes
//!
//! Level 4 - Utilities
//!
//! Real bots run out of process and hand back a maze file; these in-process
//! agents stand in for them. Every agent sees the canonical board, on which
//! it is always `PlayerA`.

use std::collections::VecDeque;

use pacduel_core::{Board, GameState, LegalMove, RuleSet, TurnOutcome};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::AgentKind;

/// What came back from an agent for one ply
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submission {
    Maze(Board),
    /// Nothing arrived in time
    NoSubmission,
    /// Something arrived but did not parse as a maze
    Unreadable,
}

impl Submission {
    /// Classify raw maze text as delivered by an external bot
    pub fn from_text(text: Option<&str>) -> Self {
        match text {
            None => Submission::NoSubmission,
            Some(text) => match text.parse::<Board>() {
                Ok(board) => Submission::Maze(board),
                Err(_) => Submission::Unreadable,
            },
        }
    }
}

pub trait Agent: Send {
    fn name(&self) -> &str;

    /// Produce the maze for the next ply
    fn submit(&mut self, state: &GameState, rules: &RuleSet) -> Submission;
}

/// Build a boxed agent of the given kind
pub fn create_agent(kind: AgentKind, name: impl Into<String>, seed: u64) -> Box<dyn Agent> {
    match kind {
        AgentKind::Random => Box::new(RandomAgent::new(name, seed)),
        AgentKind::Greedy => Box::new(GreedyAgent::new(name, seed)),
    }
}

fn legal_moves_or_log(state: &GameState, rules: &RuleSet, name: &str) -> Vec<LegalMove> {
    match state.legal_moves(rules) {
        Ok(moves) => moves,
        Err(e) => {
            tracing::warn!("{}: cannot enumerate moves: {}", name, e);
            Vec::new()
        }
    }
}

// ============================================================================
// RANDOM
// ============================================================================

pub struct RandomAgent {
    name: String,
    rng: ChaCha8Rng,
}

impl RandomAgent {
    pub fn new(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn submit(&mut self, state: &GameState, rules: &RuleSet) -> Submission {
        let moves = legal_moves_or_log(state, rules, &self.name);
        match moves.choose(&mut self.rng) {
            Some(mv) => Submission::Maze(mv.board.clone()),
            None => Submission::NoSubmission,
        }
    }
}

// ============================================================================
// GREEDY
// ============================================================================

/// Takes the best immediate payoff; ties broken at random
pub struct GreedyAgent {
    name: String,
    rng: ChaCha8Rng,
}

impl GreedyAgent {
    pub fn new(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Points first, then kills, then keeping the pill
    fn preference(mv: &LegalMove) -> (bool, u32, bool, bool) {
        (
            mv.outcome != TurnOutcome::MoveMadeAndDiedFromPoisonPill,
            mv.points,
            mv.outcome == TurnOutcome::MoveMadeAndKilledOpponent,
            !mv.candidate.drop_poison_pill,
        )
    }
}

impl Agent for GreedyAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn submit(&mut self, state: &GameState, rules: &RuleSet) -> Submission {
        let moves = legal_moves_or_log(state, rules, &self.name);
        let Some(best) = moves.iter().map(Self::preference).max() else {
            return Submission::NoSubmission;
        };
        let top: Vec<&LegalMove> = moves.iter().filter(|m| Self::preference(m) == best).collect();
        match top.choose(&mut self.rng) {
            Some(mv) => Submission::Maze(mv.board.clone()),
            None => Submission::NoSubmission,
        }
    }
}

// ============================================================================
// SCRIPTED
// ============================================================================

/// Replays a fixed list of submissions, then goes silent
pub struct ScriptedAgent {
    name: String,
    script: VecDeque<Submission>,
}

impl ScriptedAgent {
    pub fn new(name: impl Into<String>, script: Vec<Submission>) -> Self {
        Self {
            name: name.into(),
            script: script.into(),
        }
    }
}

impl Agent for ScriptedAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn submit(&mut self, _state: &GameState, _rules: &RuleSet) -> Submission {
        self.script.pop_front().unwrap_or(Submission::NoSubmission)
    }
}
