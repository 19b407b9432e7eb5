//! The bundled starting maze
//!
//! Row 10 is the wraparound tunnel. The column-9 shaft at rows 9..=11 is
//! the respawn zone; both default rule parameters and the perft reference
//! counts assume this layout. The two walled-in corner cells on the left
//! edge are holding cells: a dead agent waits there while the respawn
//! cell is taken.

use std::path::Path;

use anyhow::Context;

use crate::board::{Board, Coordinate};
use crate::error::BoardError;

pub const MAZE_WIDTH: usize = 19;
pub const MAZE_HEIGHT: usize = 22;

/// Spawn cell of the agent that moves first
pub const PLAYER_A_START: Coordinate = Coordinate::new(16, 9);
/// Spawn cell of the agent that moves second
pub const PLAYER_B_START: Coordinate = Coordinate::new(4, 9);

/// Enclosed cells for agents waiting to respawn
pub const HOLDING_CELLS: [Coordinate; 2] =
    [Coordinate::new(0, 0), Coordinate::new(MAZE_HEIGHT - 1, 0)];

pub const DEFAULT_MAZE_ROWS: [&str; MAZE_HEIGHT] = [
    " ##################",
    "#........#........#",
    "#*##.###.#.###.##*#",
    "#.##.###.#.###.##.#",
    "#........B........#",
    "#.##.#.#####.#.##.#",
    "#....#...#...#....#",
    "####.### # ###.####",
    "   #.#       #.#   ",
    "####.# ## ## #.####",
    "    .  ## ##  .    ",
    "####.# ## ## #.####",
    "   #.#       #.#   ",
    "####.# ##### #.####",
    "#........#........#",
    "#.##.###.#.###.##.#",
    "#*.#.....A.....#.*#",
    "##.#.#.#####.#.#.##",
    "#....#...#...#....#",
    "#.######.#.######.#",
    "#.................#",
    " ##################",
];

/// Parse the bundled maze
pub fn default_board() -> Result<Board, BoardError> {
    Board::from_rows(&DEFAULT_MAZE_ROWS)
}

/// Read a maze text file
pub fn load_board(path: &Path) -> anyhow::Result<Board> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading maze {}", path.display()))?;
    let board = text
        .parse::<Board>()
        .with_context(|| format!("parsing maze {}", path.display()))?;
    Ok(board)
}
