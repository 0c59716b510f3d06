use std::fmt;

use serde::{Deserialize, Serialize};

/// Grid coordinate in row-major order: row first, then column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    /// Zero-based row index.
    pub row: usize,
    /// Zero-based column index.
    pub col: usize,
}

impl Coord {
    /// Creates a coordinate from its row and column indices.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns the row-major linear index of this coordinate on a `dim`-wide board.
    pub fn linear(&self, dim: usize) -> usize {
        self.row * dim + self.col
    }

    /// Inverse of [`Coord::linear`].
    pub fn from_linear(index: usize, dim: usize) -> Self {
        Self {
            row: index / dim,
            col: index % dim,
        }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Outcome of a single probe of one cell.
///
/// The two oracle procedures are asymmetric: a cell with a target can only
/// yield `Hit` or `Undetermined`; a cell without one can only yield `Clear`
/// or `Undetermined`. `Undetermined` leaves the cell eligible for re-probing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Observation {
    /// The probe triggered the hidden target.
    Hit,
    /// The probe confirmed the cell holds no target.
    Clear,
    /// The probe resolved nothing; the cell stays unknown.
    Undetermined,
}

/// Resolution state of one result-grid cell.
///
/// `Unknown` is the initial state; `Clear` and `Hit` are absorbing. A target
/// cell still `Unknown` at the end of a run is "located but never triggered".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellStatus {
    /// Not yet resolved; will be probed again on the next sweep.
    Unknown,
    /// Confirmed free of targets.
    Clear,
    /// Target triggered by a probe.
    Hit,
}

impl CellStatus {
    /// Whether the cell has reached a decisive (absorbing) state.
    pub fn is_decisive(&self) -> bool {
        !matches!(self, CellStatus::Unknown)
    }
}
