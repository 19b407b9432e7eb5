//! Perft command - count move-tree nodes per depth
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: count_depths(), report_results()
//! - Level 3: count_one_depth(), print_divide()
//! - Level 4: formatting utilities

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};

use pacduel_core::perft::{check_depth, count_nodes, divide, reference_count};
use pacduel_core::{GameState, MoveCandidate, RuleSet};

use crate::inputs::{load_maze, load_rules};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PerftArgs {
    /// Deepest depth to count
    #[arg(long, default_value = "6")]
    pub depth: u32,

    /// Also print per-root-move counts at the deepest depth
    #[arg(long)]
    pub divide: bool,

    /// Skip comparison with the reference totals
    #[arg(long)]
    pub no_verify: bool,

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

/// Count at one depth
#[derive(Clone, Debug, serde::Serialize)]
struct DepthResult {
    depth: u32,
    nodes: u64,
    expected: Option<u64>,
    #[serde(skip)]
    elapsed: Duration,
    millis: u128,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run perft command
///
/// 1. Load maze and rules
/// 2. Count every depth up to the requested one
/// 3. Report, then fail if any verified depth mismatched
pub fn run(args: PerftArgs) -> Result<()> {
    let board = load_maze(args.maze.as_deref())?;
    let rules = load_rules(args.rules.as_deref(), &board)?;
    let state = GameState::new(board, "A", "B", &rules)?;

    // Reference totals only describe the bundled maze under default rules
    let verify = !args.no_verify && args.maze.is_none() && args.rules.is_none();
    if !args.no_verify && !verify {
        tracing::info!("Custom maze or rules given; skipping reference check");
    }

    tracing::info!("Starting perft to depth {} (rules '{}')", args.depth, rules.name);

    let results = count_depths(&state, &rules, args.depth)?;
    report_results(&results, &args);

    if args.divide {
        let split = divide(&state, &rules, args.depth)?;
        print_divide(&split, args.depth);
    }

    if verify {
        let mut failed = 0;
        for r in &results {
            if r.expected.is_none() {
                continue;
            }
            if let Err(e) = check_depth(r.depth, r.nodes) {
                tracing::error!("{}", e);
                failed += 1;
            }
        }
        if failed > 0 {
            bail!("{} depth(s) disagree with the reference totals", failed);
        }
        tracing::info!("All reference depths match");
    }

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn count_depths(state: &GameState, rules: &RuleSet, max_depth: u32) -> Result<Vec<DepthResult>> {
    let progress = ProgressBar::new(max_depth as u64 + 1);
    progress.set_style(
        ProgressStyle::with_template("{bar:30} depth {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut results = Vec::with_capacity(max_depth as usize + 1);
    for depth in 0..=max_depth {
        let result = count_one_depth(state, rules, depth)?;
        progress.set_message(format!("{} nodes", result.nodes));
        progress.inc(1);
        results.push(result);
    }
    progress.finish_and_clear();

    Ok(results)
}

fn report_results(results: &[DepthResult], args: &PerftArgs) {
    if args.json {
        print_json_results(results);
    } else {
        print_text_results(results);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn count_one_depth(state: &GameState, rules: &RuleSet, depth: u32) -> Result<DepthResult> {
    let start = Instant::now();
    let nodes = count_nodes(state, rules, depth)?;
    let elapsed = start.elapsed();

    Ok(DepthResult {
        depth,
        nodes,
        expected: reference_count(depth),
        elapsed,
        millis: elapsed.as_millis(),
    })
}

fn print_divide(split: &[(MoveCandidate, u64)], depth: u32) {
    println!("\n=== Divide (depth {}) ===", depth);
    for (candidate, nodes) in split {
        println!("{:<6} {:<5} {}", format!("{:?}", candidate.direction), drop_label(candidate), nodes);
    }
    let total: u64 = split.iter().map(|(_, n)| n).sum();
    println!("Total: {}", total);
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn drop_label(candidate: &MoveCandidate) -> &'static str {
    if candidate.drop_poison_pill {
        "+pill"
    } else {
        ""
    }
}

fn print_json_results(results: &[DepthResult]) {
    if let Ok(json) = serde_json::to_string_pretty(results) {
        println!("{}", json);
    }
}

fn print_text_results(results: &[DepthResult]) {
    println!("\n=== Perft ===");
    println!("{:>5} {:>14} {:>14} {:>10}", "depth", "nodes", "expected", "time");
    for r in results {
        let expected = match r.expected {
            Some(n) if n == r.nodes => format!("{} ok", n),
            Some(n) => format!("{} MISMATCH", n),
            None => "-".to_string(),
        };
        println!("{:>5} {:>14} {:>14} {:>9.3}s", r.depth, r.nodes, expected, r.elapsed.as_secs_f64());
    }
}
