//! Match play - a series of games between two agents
//!
//! Level 2 - Phase-level implementation

use pacduel_core::{Board, BoardError, GameState, RuleSet};
use rayon::prelude::*;
use serde::Serialize;

use crate::agents::create_agent;
use crate::config::{AgentKind, MatchConfig};
use crate::game_runner::{GameRecord, GameRunner, Seat};

/// One game of a series, with which agent took the first seat
#[derive(Clone, Debug, Serialize)]
pub struct SeriesGame {
    pub index: usize,
    /// True if agent A made the opening move
    pub a_moved_first: bool,
    pub record: GameRecord,
}

impl SeriesGame {
    /// Winner as agent A (`Some(true)`), agent B (`Some(false)`) or draw
    pub fn a_won(&self) -> Option<bool> {
        self.record
            .winner
            .map(|seat| (seat == Seat::First) == self.a_moved_first)
    }
}

/// Result of a series (multiple games)
#[derive(Clone, Debug, Serialize)]
pub struct MatchResult {
    pub agent_a: String,
    pub agent_b: String,
    pub a_wins: u32,
    pub b_wins: u32,
    pub draws: u32,
    pub forfeits: u32,
    /// Average game length in plies
    pub avg_plies: f32,
    pub games_played: u32,
    pub games: Vec<SeriesGame>,
}

impl MatchResult {
    /// Create empty result
    pub fn empty(agent_a: &str, agent_b: &str) -> Self {
        Self {
            agent_a: agent_a.to_string(),
            agent_b: agent_b.to_string(),
            a_wins: 0,
            b_wins: 0,
            draws: 0,
            forfeits: 0,
            avg_plies: 0.0,
            games_played: 0,
            games: Vec::new(),
        }
    }

    /// Get win rate for agent A
    pub fn a_win_rate(&self) -> f32 {
        rate(self.a_wins, self.games_played)
    }

    /// Get win rate for agent B
    pub fn b_win_rate(&self) -> f32 {
        rate(self.b_wins, self.games_played)
    }

    /// Get draw rate
    pub fn draw_rate(&self) -> f32 {
        rate(self.draws, self.games_played)
    }
}

/// Play a series between the two agents named in `config` (Level 2 phase)
///
/// Games alternate which agent moves first. Agent names are derived from
/// their kinds, e.g. `a:greedy` and `b:random`.
pub fn play_match(board: &Board, rules: &RuleSet, config: &MatchConfig) -> Result<MatchResult, BoardError> {
    let name_a = agent_name("A", config.agent_a);
    let name_b = agent_name("B", config.agent_b);

    if config.games == 0 {
        return Ok(MatchResult::empty(&name_a, &name_b));
    }

    tracing::info!(
        "Starting match: {} vs {} ({} games{})",
        name_a,
        name_b,
        config.games,
        if config.parallel { ", parallel" } else { "" }
    );

    let games = prepare_games(config.games);
    let play = |spec: &GameSpec| play_single_game(board, rules, config, &name_a, &name_b, spec);

    let results: Vec<SeriesGame> = if config.parallel {
        games.par_iter().map(play).collect::<Result<_, _>>()?
    } else {
        games.iter().map(play).collect::<Result<_, _>>()?
    };

    Ok(aggregate_results(&name_a, &name_b, results))
}

// ============================================================================
// Level 3 - Steps
// ============================================================================

/// Seating and seed index for one game
#[derive(Clone, Copy)]
struct GameSpec {
    index: usize,
    a_moves_first: bool,
}

fn prepare_games(games: usize) -> Vec<GameSpec> {
    (0..games)
        .map(|index| GameSpec {
            index,
            a_moves_first: index % 2 == 0,
        })
        .collect()
}

fn play_single_game(
    board: &Board,
    rules: &RuleSet,
    config: &MatchConfig,
    name_a: &str,
    name_b: &str,
    spec: &GameSpec,
) -> Result<SeriesGame, BoardError> {
    // Two independent streams per game
    let seed = config.base_seed().wrapping_add(2 * spec.index as u64);
    let mut agent_a = create_agent(config.agent_a, name_a, seed);
    let mut agent_b = create_agent(config.agent_b, name_b, seed.wrapping_add(1));

    let runner = GameRunner::new(rules, config);
    let record = if spec.a_moves_first {
        let state = GameState::new(board.clone(), name_a, name_b, rules)?;
        runner.play_game(state, agent_a.as_mut(), agent_b.as_mut())?
    } else {
        let state = GameState::new(board.clone(), name_b, name_a, rules)?;
        runner.play_game(state, agent_b.as_mut(), agent_a.as_mut())?
    };

    tracing::info!(
        "Game {}: {:?}, {} {} - {} {} ({} plies)",
        spec.index + 1,
        record.end,
        record.name(Seat::First),
        record.score(Seat::First),
        record.score(Seat::Second),
        record.name(Seat::Second),
        record.plies
    );

    Ok(SeriesGame {
        index: spec.index,
        a_moved_first: spec.a_moves_first,
        record,
    })
}

fn aggregate_results(name_a: &str, name_b: &str, games: Vec<SeriesGame>) -> MatchResult {
    let mut result = MatchResult::empty(name_a, name_b);

    for game in &games {
        match game.a_won() {
            Some(true) => result.a_wins += 1,
            Some(false) => result.b_wins += 1,
            None => result.draws += 1,
        }
        if matches!(game.record.end, crate::game_runner::GameEnd::Forfeit { .. }) {
            result.forfeits += 1;
        }
    }

    let total_plies: u32 = games.iter().map(|g| g.record.plies).sum();
    result.games_played = games.len() as u32;
    result.avg_plies = if games.is_empty() {
        0.0
    } else {
        total_plies as f32 / games.len() as f32
    };
    result.games = games;
    result
}

// ============================================================================
// Level 4 - Utilities
// ============================================================================

fn agent_name(label: &str, kind: AgentKind) -> String {
    format!("{}:{:?}", label, kind).to_lowercase()
}

fn rate(count: u32, total: u32) -> f32 {
    if total == 0 {
        0.0
    } else {
        count as f32 / total as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pacduel_core::default_board;

    #[test]
    fn test_empty_match() {
        let config = MatchConfig::new(0);
        let result = play_match(&default_board().unwrap(), &RuleSet::default(), &config).unwrap();
        assert_eq!(result.games_played, 0);
        assert_eq!(result.a_win_rate(), 0.0);
    }

    #[test]
    fn test_seats_alternate() {
        let games = prepare_games(4);
        let firsts: Vec<bool> = games.iter().map(|g| g.a_moves_first).collect();
        assert_eq!(firsts, vec![true, false, true, false]);
    }

    #[test]
    fn test_match_totals_add_up() {
        let config = MatchConfig {
            max_plies: 60,
            ..MatchConfig::new(4).with_seed(9).sequential()
        };
        let result = play_match(&default_board().unwrap(), &RuleSet::default(), &config).unwrap();
        assert_eq!(result.games_played, 4);
        assert_eq!(result.a_wins + result.b_wins + result.draws, 4);
        assert!(result.avg_plies <= 60.0);
        assert_eq!(result.agent_a, "a:greedy");
        assert_eq!(result.agent_b, "b:random");
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let base = MatchConfig {
            max_plies: 40,
            ..MatchConfig::new(4).with_seed(3)
        };
        let board = default_board().unwrap();
        let rules = RuleSet::default();
        let parallel = play_match(&board, &rules, &base).unwrap();
        let sequential = play_match(&board, &rules, &base.clone().sequential()).unwrap();

        let plies = |r: &MatchResult| r.games.iter().map(|g| g.record.plies).collect::<Vec<_>>();
        assert_eq!(plies(&parallel), plies(&sequential));
        assert_eq!(parallel.a_wins, sequential.a_wins);
    }

    #[test]
    fn test_a_won_respects_seating() {
        let record = GameRecord {
            end: crate::game_runner::GameEnd::PlyLimit,
            winner: Some(Seat::First),
            names: ["b".to_string(), "a".to_string()],
            scores: [3, 1],
            plies: 10,
            history: Vec::new(),
        };
        let game = SeriesGame { index: 1, a_moved_first: false, record };
        assert_eq!(game.a_won(), Some(false));
    }
}
