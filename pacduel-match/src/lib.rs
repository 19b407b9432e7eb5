//! PACDUEL Match - Refereeing games between agents
//!
//! This crate drives the core rules engine with real submissions:
//! - Agent seam (maze, no submission, unreadable)
//! - Single-game refereeing with forfeits and end conditions
//! - Multi-game series with alternating first move
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: callers (the CLI)
//! - Level 2: play_match (series)
//! - Level 3: GameRunner::play_game (steps)
//! - Level 4: agents, configuration

mod agents;
mod config;
mod game_runner;
mod match_play;

pub use agents::{create_agent, Agent, GreedyAgent, RandomAgent, ScriptedAgent, Submission};
pub use config::{AgentKind, MatchConfig};
pub use game_runner::{ForfeitReason, GameEnd, GameRecord, GameRunner, Seat};
pub use match_play::{play_match, MatchResult, SeriesGame};
