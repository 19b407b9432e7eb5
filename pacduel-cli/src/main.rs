//! PACDUEL CLI - Command-line interface
//!
//! Commands:
//! - perft: Count move-tree nodes and check them against reference totals
//! - play: Referee a series of games between built-in agents
//! - validate: Judge one submitted maze against the previous one

mod inputs;
mod perft;
mod play;
mod validate;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pacduel")]
#[command(about = "PACDUEL Pac-Man duel referee")]
struct Cli {
    /// Random seed for reproducibility
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count move-tree nodes
    Perft(perft::PerftArgs),
    /// Referee games between built-in agents
    Play(play::PlayArgs),
    /// Validate a submitted maze
    Validate(validate::ValidateArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Perft(args) => perft::run(args),
        Commands::Play(args) => play::run(args, cli.seed),
        Commands::Validate(args) => validate::run(args),
    }
}
