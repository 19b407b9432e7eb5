//! Maze grid snapshots on a cylinder (columns wrap, rows do not)

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BoardError;

// ============================================================================
// COORDINATES
// ============================================================================

/// Grid coordinate, row-major
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// One unit step in `direction`.
    ///
    /// The column wraps modulo `width`; stepping past the top or bottom row
    /// returns `None`.
    pub fn step(self, direction: Direction, width: usize, height: usize) -> Option<Coordinate> {
        let (dr, dc) = direction.delta();
        let row = self.row as isize + dr;
        if row < 0 || row >= height as isize || width == 0 {
            return None;
        }
        let col = (self.col as isize + dc).rem_euclid(width as isize);
        Some(Coordinate::new(row as usize, col as usize))
    }

    /// Direction that leads from `self` to the adjacent `other`
    pub fn direction_to(self, other: Coordinate, width: usize, height: usize) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&d| self.step(d, width, height) == Some(other))
    }
}

/// Orthogonal unit moves, in enumeration order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// (row delta, column delta)
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

// ============================================================================
// SYMBOLS
// ============================================================================

/// Cell contents
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    Empty,
    Wall,
    Pellet,
    PowerPellet,
    PoisonPill,
    PlayerA,
    PlayerB,
}

impl Symbol {
    pub const fn to_char(self) -> char {
        match self {
            Symbol::Empty => ' ',
            Symbol::Wall => '#',
            Symbol::Pellet => '.',
            Symbol::PowerPellet => '*',
            Symbol::PoisonPill => '!',
            Symbol::PlayerA => 'A',
            Symbol::PlayerB => 'B',
        }
    }

    pub const fn from_char(ch: char) -> Option<Symbol> {
        match ch {
            ' ' => Some(Symbol::Empty),
            '#' => Some(Symbol::Wall),
            '.' => Some(Symbol::Pellet),
            '*' => Some(Symbol::PowerPellet),
            '!' => Some(Symbol::PoisonPill),
            'A' => Some(Symbol::PlayerA),
            'B' => Some(Symbol::PlayerB),
            _ => None,
        }
    }

    pub fn is_player(self) -> bool {
        matches!(self, Symbol::PlayerA | Symbol::PlayerB)
    }

    pub fn is_pellet(self) -> bool {
        matches!(self, Symbol::Pellet | Symbol::PowerPellet)
    }
}

/// One differing cell between two boards
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellChange {
    pub at: Coordinate,
    pub old: Symbol,
    pub new: Symbol,
}

// ============================================================================
// BOARD
// ============================================================================

/// Immutable maze snapshot.
///
/// Every transformation returns a new board, so a board can be shared
/// freely between search branches.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Symbol>,
}

impl Board {
    /// Build a board from row-major cells
    pub fn new(width: usize, height: usize, cells: Vec<Symbol>) -> Result<Self, BoardError> {
        if width == 0 || height == 0 {
            return Err(BoardError::EmptyMaze);
        }
        if cells.len() != width * height {
            return Err(BoardError::RaggedRow {
                row: cells.len() / width,
                expected: width,
                found: cells.len() % width,
            });
        }
        Ok(Self { width, height, cells })
    }

    /// Parse one string per row
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, BoardError> {
        let width = match rows.first() {
            Some(first) => first.as_ref().chars().count(),
            None => return Err(BoardError::EmptyMaze),
        };

        let mut cells = Vec::with_capacity(width * rows.len());
        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let found = line.chars().count();
            if found != width {
                return Err(BoardError::RaggedRow { row, expected: width, found });
            }
            for (col, ch) in line.chars().enumerate() {
                let symbol = Symbol::from_char(ch)
                    .ok_or(BoardError::UnknownSymbol { ch, row, col })?;
                cells.push(symbol);
            }
        }

        Board::new(width, rows.len(), cells)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn same_dimensions(&self, other: &Board) -> bool {
        self.width == other.width && self.height == other.height
    }

    fn index(&self, at: Coordinate) -> Result<usize, BoardError> {
        if at.row >= self.height || at.col >= self.width {
            return Err(BoardError::OutOfRange {
                row: at.row,
                col: at.col,
                width: self.width,
                height: self.height,
            });
        }
        Ok(at.row * self.width + at.col)
    }

    /// Symbol at an in-range coordinate. Columns are not normalized here.
    pub fn symbol_at(&self, at: Coordinate) -> Result<Symbol, BoardError> {
        Ok(self.cells[self.index(at)?])
    }

    /// Copy of this board with one cell replaced
    pub fn with_symbol(&self, at: Coordinate, symbol: Symbol) -> Result<Board, BoardError> {
        let idx = self.index(at)?;
        let mut next = self.clone();
        next.cells[idx] = symbol;
        Ok(next)
    }

    /// Cells holding `symbol`, row-major
    pub fn positions_of(&self, symbol: Symbol) -> impl Iterator<Item = Coordinate> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, s)| **s == symbol)
            .map(move |(i, _)| Coordinate::new(i / self.width, i % self.width))
    }

    /// Unique cell holding `symbol`, or `None` when absent.
    ///
    /// More than one match is an invariant violation.
    pub fn locate(&self, symbol: Symbol) -> Result<Option<Coordinate>, BoardError> {
        let mut found = self.positions_of(symbol);
        let first = found.next();
        let extra = found.count();
        if extra > 0 {
            return Err(BoardError::AmbiguousSymbol { symbol, count: extra + 1 });
        }
        Ok(first)
    }

    /// Unique cell holding `symbol`; absence is an error
    pub fn find_coordinate_of(&self, symbol: Symbol) -> Result<Coordinate, BoardError> {
        self.locate(symbol)?.ok_or(BoardError::SymbolNotFound(symbol))
    }

    /// Cells whose symbol differs, with `self` as the old side
    pub fn diff(&self, other: &Board) -> Result<Vec<CellChange>, BoardError> {
        if !self.same_dimensions(other) {
            return Err(BoardError::DimensionMismatch {
                left_width: self.width,
                left_height: self.height,
                right_width: other.width,
                right_height: other.height,
            });
        }

        Ok(self
            .cells
            .iter()
            .zip(&other.cells)
            .enumerate()
            .filter(|(_, (old, new))| old != new)
            .map(|(i, (&old, &new))| CellChange {
                at: Coordinate::new(i / self.width, i % self.width),
                old,
                new,
            })
            .collect())
    }

    /// Relabel PlayerA as PlayerB and vice versa
    pub fn swap_player_symbols(&self) -> Board {
        let cells = self
            .cells
            .iter()
            .map(|&s| match s {
                Symbol::PlayerA => Symbol::PlayerB,
                Symbol::PlayerB => Symbol::PlayerA,
                other => other,
            })
            .collect();
        Board {
            width: self.width,
            height: self.height,
            cells,
        }
    }

    pub fn count(&self, symbol: Symbol) -> usize {
        self.cells.iter().filter(|&&s| s == symbol).count()
    }

    /// Pellets and power pellets left to eat
    pub fn pellets_remaining(&self) -> usize {
        self.cells.iter().filter(|s| s.is_pellet()).count()
    }
}

// ============================================================================
// TEXT CODEC
// ============================================================================

impl FromStr for Board {
    type Err = BoardError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = text
            .lines()
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect();
        Board::from_rows(&rows)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            let line: String = row.iter().map(|s| s.to_char()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
