// Coordinate model identifying one cell of the warehouse grid

use serde::{Deserialize, Serialize};
use std::fmt;

/// A (row, column) grid cell. Serialized as a `[row, col]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    /// Creates a new coordinate
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance between two cells
    pub fn manhattan_distance_to(&self, other: &Coordinate) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// True when the two cells share an edge
    pub fn is_adjacent_to(&self, other: &Coordinate) -> bool {
        self.manhattan_distance_to(other) == 1
    }

    /// Centre of the cell in continuous (x = col, y = row) space
    pub fn center(&self) -> (f64, f64) {
        (self.col as f64 + 0.5, self.row as f64 + 0.5)
    }

    /// The cell one row up, if any
    pub fn above(&self) -> Option<Coordinate> {
        self.row.checked_sub(1).map(|row| Coordinate::new(row, self.col))
    }

    /// The cell one row down
    pub fn below(&self) -> Coordinate {
        Coordinate::new(self.row + 1, self.col)
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl From<Coordinate> for (usize, usize) {
    fn from(coordinate: Coordinate) -> Self {
        (coordinate.row, coordinate.col)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
