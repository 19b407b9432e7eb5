//! Validate command - judge one submitted maze
//!
//! Exits with an error when the submission would be rejected, so it can
//! gate a bot's output in scripts.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;

use pacduel_core::{load_board, validate_maze, GameState, MazeValidationOutcome, Ply};

use crate::inputs::load_rules;

#[derive(Args)]
pub struct ValidateArgs {
    /// Maze before the move; the mover is 'A'
    #[arg(long, value_name = "FILE")]
    pub previous: PathBuf,

    /// Maze submitted by the mover
    #[arg(long, value_name = "FILE")]
    pub candidate: PathBuf,

    /// Poison pills the mover has left (default: the rule set's starting count)
    #[arg(long)]
    pub pills: Option<u8>,

    /// Rule set JSON file (default: built-in rules)
    #[arg(long, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Print the board the next mover would see
    #[arg(long)]
    pub show_next: bool,
}

pub fn run(args: ValidateArgs) -> Result<()> {
    let previous = load_board(&args.previous)?;
    let candidate = load_board(&args.candidate)?;
    let rules = load_rules(args.rules.as_deref(), &previous)?;

    let maze_outcome = validate_maze(&candidate, &previous)?;
    println!("Maze: {:?}", maze_outcome);
    if maze_outcome != MazeValidationOutcome::ValidMaze {
        bail!("submission rejected: {:?}", maze_outcome);
    }

    let mut state = GameState::new(previous, "mover", "opponent", &rules)?;
    if let Some(pills) = args.pills {
        state.mover.poison_pills = pills;
    }

    match state.advance(&candidate, &rules)? {
        Ply::Accepted { state: next, outcome, points, regenerated } => {
            println!("Turn: {:?} (+{} points)", outcome, points);
            if regenerated {
                println!("Opponent respawned at {:?}", next.mover.position);
            }
            if args.show_next {
                print!("{}", next.board);
            }
            Ok(())
        }
        Ply::IllegalTurn(outcome) => {
            println!("Turn: {:?}", outcome);
            bail!("submission rejected: {:?}", outcome)
        }
        Ply::InvalidMaze(outcome) => bail!("submission rejected: {:?}", outcome),
    }
}
