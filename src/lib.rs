//! Random obstacle grids with a path from start to goal
//!
//! A [GridGenerator](grid_generator::GridGenerator) scatters obstacles on a
//! rectangular grid, keeping the start and goal cells open. A
//! [ConnectivityChecker](connectivity::ConnectivityChecker) then verifies by
//! breadth-first search that the goal can be reached, clearing obstacles and
//! retrying within a bounded number of attempts and a wall-clock budget.
//!
//! # Examples
//! ## Generate a seeded grid and check it
//! ```
//! use grid_scenario::{GridConfig, GridGenerator};
//!
//! let config = GridConfig::new(6, 8).with_obstacles(10);
//! let mut generator = GridGenerator::new(config, Some(7)).unwrap();
//! let mut grid = generator.create_grid();
//! assert_eq!(grid.blocked_count(), 10);
//!
//! let report = generator.check(&mut grid).unwrap();
//! println!("{}", grid.render_with(generator.config().start, generator.config().goal));
//! report.print_report();
//! ```
//!
//! ## Check a fixed grid
//! ```
//! use grid_scenario::{connectivity::ConnectivityChecker, Coord, Grid};
//!
//! let grid_text = "
//! ..#..
//! .##.#
//! ...#.
//! ###...";
//! let mut grid = Grid::parse(grid_text.trim(), Grid::BLOCK_MARKER).unwrap();
//! let checker = ConnectivityChecker::new(Coord::new(0, 0), Coord::new(3, 4));
//! assert!(checker.is_path_available(&mut grid, &mut rand::thread_rng()).unwrap());
//! ```

use std::fmt;
use std::fs;
use std::ops::Index;
use std::path::Path;
use std::str::FromStr;

use itertools::Itertools;

pub mod config;
pub mod connectivity;
pub mod error;
pub mod grid_generator;

pub use config::GridConfig;
pub use error::GridError;
pub use grid_generator::GridGenerator;

/// State of a single grid cell
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
pub enum Cell {
    #[default]
    Empty,
    /// Obstacle, impassable for the search
    Blocked,
}

/// Location in the grid
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct Coord {
    pub row: usize,
    pub column: usize,
}

impl Coord {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// Whether the coordinate addresses a cell of a `rows` x `columns` grid
    pub fn is_within(&self, rows: usize, columns: usize) -> bool {
        self.row < rows && self.column < columns
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

impl FromStr for Coord {
    type Err = GridError;

    /// Parse `row,column`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GridError::InvalidCoord(s.to_string());
        let (row, column) = s.split_once(',').ok_or_else(invalid)?;
        Ok(Coord::new(
            row.trim().parse().map_err(|_| invalid())?,
            column.trim().parse().map_err(|_| invalid())?,
        ))
    }
}

/// Rectangular grid of cells, indexed by [Coord]
///
/// Dimensions are fixed at creation.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Grid {
    cells: Vec<Vec<Cell>>,
    columns: usize,
}

impl Grid {
    /// Character marking an obstacle in the fixed grid text format
    pub const BLOCK_MARKER: char = '#';
    /// Character written for empty cells when rendering
    pub const EMPTY_MARKER: char = '.';
    const START_MARKER: char = 'S';
    const GOAL_MARKER: char = 'G';

    /// North, south, west, east
    const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

    /// All-empty grid
    pub fn new(rows: usize, columns: usize) -> Result<Self, GridError> {
        if rows == 0 || columns == 0 {
            return Err(GridError::InvalidDimensions { rows, columns });
        }
        Ok(Self::empty(rows, columns))
    }

    /// All-empty grid, dimensions already validated by the caller
    pub(crate) fn empty(rows: usize, columns: usize) -> Self {
        Self {
            cells: vec![vec![Cell::Empty; columns]; rows],
            columns,
        }
    }

    /// Parse grid from text
    ///
    /// - `text`: One line per row, one character per column.
    /// - `block_marker`: Character denoting an obstacle. Any other
    ///   character is an empty cell.
    ///
    /// Returns error, if there are no rows or the rows differ in length.
    ///
    /// # Examples
    /// ```
    /// use grid_scenario::{Cell, Coord, Grid};
    ///
    /// let grid = Grid::parse("...\n.#.\n...", '#').unwrap();
    /// assert_eq!((grid.rows(), grid.columns()), (3, 3));
    /// assert_eq!(grid[Coord::new(1, 1)], Cell::Blocked);
    /// ```
    pub fn parse(text: &str, block_marker: char) -> Result<Self, GridError> {
        let cells: Vec<Vec<Cell>> = text
            .lines()
            .map(|line| {
                line.chars()
                    .map(|c| {
                        if c == block_marker {
                            Cell::Blocked
                        } else {
                            Cell::Empty
                        }
                    })
                    .collect()
            })
            .collect();

        let columns = cells.first().map(Vec::len).ok_or(GridError::EmptyGrid)?;
        if columns == 0 {
            return Err(GridError::EmptyGrid);
        }
        if let Some((row, found)) = cells
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|(_, len)| *len != columns)
        {
            return Err(GridError::RaggedRow {
                row,
                expected: columns,
                found,
            });
        }
        Ok(Self { cells, columns })
    }

    /// Read grid from a text file, see [Self::parse]
    ///
    /// Surrounding whitespace of the file is ignored.
    pub fn load(path: impl AsRef<Path>, block_marker: char) -> Result<Self, GridError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| GridError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(text.trim(), block_marker)
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.is_within(self.rows(), self.columns)
    }

    pub fn get(&self, coord: Coord) -> Option<Cell> {
        self.cells
            .get(coord.row)
            .and_then(|row| row.get(coord.column))
            .copied()
    }

    /// Set cell state
    ///
    /// Panics if `coord` is outside of the grid.
    pub fn set(&mut self, coord: Coord, cell: Cell) {
        self.cells[coord.row][coord.column] = cell;
    }

    pub fn is_blocked(&self, coord: Coord) -> bool {
        self.get(coord) == Some(Cell::Blocked)
    }

    /// Axis-aligned neighbours of `coord` that lie within the grid
    pub fn neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        Self::DIRECTIONS.into_iter().filter_map(move |(dy, dx)| {
            let row = coord.row.checked_add_signed(dy)?;
            let column = coord.column.checked_add_signed(dx)?;
            let next = Coord::new(row, column);
            self.contains(next).then_some(next)
        })
    }

    /// All coordinates in row-major order
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        (0..self.rows())
            .cartesian_product(0..self.columns)
            .map(|(row, column)| Coord::new(row, column))
    }

    /// Coordinates of obstacles in row-major order
    pub fn blocked_cells(&self) -> Vec<Coord> {
        self.coords().filter(|c| self.is_blocked(*c)).collect()
    }

    pub fn blocked_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|c| **c == Cell::Blocked)
            .count()
    }

    /// Render in the fixed grid text format, marking start and goal
    pub fn render_with(&self, start: Coord, goal: Coord) -> String {
        self.cells
            .iter()
            .enumerate()
            .map(|(row, cells)| {
                cells
                    .iter()
                    .enumerate()
                    .map(|(column, cell)| match Coord::new(row, column) {
                        c if c == start => Self::START_MARKER,
                        c if c == goal => Self::GOAL_MARKER,
                        _ => Self::marker(*cell),
                    })
                    .join("")
            })
            .join("\n")
    }

    fn marker(cell: Cell) -> char {
        match cell {
            Cell::Empty => Self::EMPTY_MARKER,
            Cell::Blocked => Self::BLOCK_MARKER,
        }
    }
}

impl Index<Coord> for Grid {
    type Output = Cell;

    fn index(&self, coord: Coord) -> &Cell {
        &self.cells[coord.row][coord.column]
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self
            .cells
            .iter()
            .map(|row| row.iter().map(|c| Self::marker(*c)).join(""))
            .join("\n");
        write!(f, "{}", text)
    }
}
