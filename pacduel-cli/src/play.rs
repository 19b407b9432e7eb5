//! Play command - referee a series of games between built-in agents
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_config(), play_match(), report_results()
//! - Level 4: formatting utilities

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;

use pacduel_match::{play_match, AgentKind, MatchConfig, MatchResult, Seat};

use crate::inputs::{load_maze, load_rules};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Number of games to play (first move alternates)
    #[arg(long)]
    pub games: Option<usize>,

    /// Agent A kind (random, greedy)
    #[arg(long)]
    pub agent_a: Option<AgentKind>,

    /// Agent B kind (random, greedy)
    #[arg(long)]
    pub agent_b: Option<AgentKind>,

    /// Maximum accepted plies per game
    #[arg(long)]
    pub max_plies: Option<u32>,

    /// Run games one after another
    #[arg(long)]
    pub sequential: bool,

    /// Match configuration JSON file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Maze text file (default: bundled maze)
    #[arg(long, value_name = "FILE")]
    pub maze: Option<PathBuf>,

    /// Rule set JSON file (default: built-in rules)
    #[arg(long, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
///
/// 1. Build the match configuration (file, then flags)
/// 2. Load maze and rules
/// 3. Play the series
/// 4. Report results
pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let config = build_config(&args, seed)?;
    let board = load_maze(args.maze.as_deref())?;
    let rules = load_rules(args.rules.as_deref(), &board)?;

    let result = play_match(&board, &rules, &config).context("match aborted on a broken board")?;

    report_results(&result, &args);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn build_config(args: &PlayArgs, seed: Option<u64>) -> Result<MatchConfig> {
    let mut config = match &args.config {
        Some(path) => MatchConfig::load(path)?,
        None => MatchConfig::default(),
    };

    if let Some(games) = args.games {
        config.games = games;
    }
    if let Some(kind) = args.agent_a {
        config.agent_a = kind;
    }
    if let Some(kind) = args.agent_b {
        config.agent_b = kind;
    }
    if let Some(max_plies) = args.max_plies {
        config.max_plies = max_plies;
    }
    if args.sequential {
        config.parallel = false;
    }
    if let Some(seed) = seed {
        config.seed = Some(seed);
    }

    Ok(config)
}

fn report_results(result: &MatchResult, args: &PlayArgs) {
    if args.json {
        print_json_results(result);
    } else {
        print_text_results(result);
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn print_json_results(result: &MatchResult) {
    #[derive(serde::Serialize)]
    struct JsonOutput<'a> {
        timestamp: String,
        a_win_rate: f32,
        b_win_rate: f32,
        #[serde(flatten)]
        result: &'a MatchResult,
    }

    let output = JsonOutput {
        timestamp: Utc::now().to_rfc3339(),
        a_win_rate: result.a_win_rate(),
        b_win_rate: result.b_win_rate(),
        result,
    };

    if let Ok(json) = serde_json::to_string_pretty(&output) {
        println!("{}", json);
    }
}

fn print_text_results(result: &MatchResult) {
    println!("\n=== Match Results ===");
    println!("{} vs {}", result.agent_a, result.agent_b);
    println!("Total games: {}", result.games_played);
    println!("{:<12} {} ({:.1}%)", format!("{} wins:", result.agent_a), result.a_wins, result.a_win_rate() * 100.0);
    println!("{:<12} {} ({:.1}%)", format!("{} wins:", result.agent_b), result.b_wins, result.b_win_rate() * 100.0);
    println!("{:<12} {} ({:.1}%)", "Draws:", result.draws, result.draw_rate() * 100.0);
    println!("Forfeits:    {}", result.forfeits);
    println!("Avg plies:   {:.1}", result.avg_plies);

    println!("\n--- Games ---");
    for game in &result.games {
        let r = &game.record;
        let winner = match r.winner {
            Some(seat) => r.name(seat).to_string(),
            None => "draw".to_string(),
        };
        println!(
            "#{:<3} {} {:>4} - {:<4} {}  {:?}, {} plies, winner: {}",
            game.index + 1,
            r.name(Seat::First),
            r.score(Seat::First),
            r.score(Seat::Second),
            r.name(Seat::Second),
            r.end,
            r.plies,
            winner
        );
    }
}
