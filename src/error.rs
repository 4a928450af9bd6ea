//! Errors raised while configuring, generating or loading grids

use std::{fmt, io, path::PathBuf};

use crate::Coord;

/// Error type for grid construction and loading.
///
/// An unreachable goal is not an error; see
/// [CheckEnding](crate::connectivity::CheckEnding).
#[derive(Debug)]
pub enum GridError {
    /// Grid must have at least one row and one column
    InvalidDimensions { rows: usize, columns: usize },
    /// Start or goal lies outside of the grid
    OutOfBounds {
        what: &'static str,
        coord: Coord,
        rows: usize,
        columns: usize,
    },
    /// Obstacles would leave no free cell open
    Capacity { requested: usize, free: usize },
    /// Connectivity check must be allowed at least one attempt
    InvalidAttemptBudget,
    /// Coordinate text is not of the form `row,column`
    InvalidCoord(String),
    /// Fixed grid text contained no rows
    EmptyGrid,
    /// Fixed grid row length differs from the first row
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// Fixed grid resource could not be read
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::InvalidDimensions { rows, columns } => {
                write!(f, "Invalid grid dimensions {}x{}", rows, columns)
            }
            GridError::OutOfBounds {
                what,
                coord,
                rows,
                columns,
            } => write!(
                f,
                "{} {} is outside of the {}x{} grid",
                what, coord, rows, columns
            ),
            GridError::Capacity { requested, free } => write!(
                f,
                "Cannot place {} obstacles in {} free cells, one must stay open",
                requested, free
            ),
            GridError::InvalidAttemptBudget => {
                write!(f, "Connectivity check needs at least one attempt")
            }
            GridError::InvalidCoord(text) => {
                write!(f, "Invalid coordinate `{}`, expected `row,column`", text)
            }
            GridError::EmptyGrid => write!(f, "Grid text contains no rows"),
            GridError::RaggedRow {
                row,
                expected,
                found,
            } => write!(
                f,
                "Row {} has {} columns, expected {}",
                row, found, expected
            ),
            GridError::Io { path, source } => {
                write!(f, "Could not read grid from {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for GridError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GridError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
