use ifm_core::{CellStatus, Coord, ErrorInfo, IfmError, Observation};

use crate::board::Board;

/// Per-cell counts of a result grid snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusCounts {
    /// Cells still unresolved.
    pub unknown: usize,
    /// Cells confirmed clear.
    pub clear: usize,
    /// Cells with triggered targets.
    pub hit: usize,
}

/// Tri-state resolution grid, mutated cell-by-cell by the scan controller.
///
/// Transitions are monotone: `Unknown -> Clear` and `Unknown -> Hit` only.
/// Decisive states are absorbing; attempting to overwrite one is a grid
/// error rather than a silent no-op, since only the controller writes here
/// and it must never probe a resolved cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultGrid {
    board: Board,
    cells: Vec<CellStatus>,
}

impl ResultGrid {
    /// Creates a grid with every cell `Unknown`.
    pub fn new(board: Board) -> Self {
        Self {
            board,
            cells: vec![CellStatus::Unknown; board.cell_count()],
        }
    }

    /// Returns the board this grid covers.
    pub fn board(&self) -> Board {
        self.board
    }

    /// Current status of one cell.
    pub fn status(&self, coord: Coord) -> CellStatus {
        self.cells[coord.linear(self.board.dim())]
    }

    /// Applies a probe observation to a cell.
    ///
    /// Returns `true` when the observation was decisive and the cell
    /// transitioned, `false` when it was `Undetermined` and nothing changed.
    pub fn resolve(&mut self, coord: Coord, observation: Observation) -> Result<bool, IfmError> {
        let index = coord.linear(self.board.dim());
        if self.cells[index].is_decisive() {
            return Err(IfmError::Grid(
                ErrorInfo::new("cell-already-resolved", "decisive cell states are absorbing")
                    .with_context("coord", coord.to_string())
                    .with_context("status", format!("{:?}", self.cells[index])),
            ));
        }
        match observation {
            Observation::Hit => {
                self.cells[index] = CellStatus::Hit;
                Ok(true)
            }
            Observation::Clear => {
                self.cells[index] = CellStatus::Clear;
                Ok(true)
            }
            Observation::Undetermined => Ok(false),
        }
    }

    /// Number of cells still `Unknown`.
    pub fn unknown_count(&self) -> usize {
        self.counts().unknown
    }

    /// Counts cells by status.
    pub fn counts(&self) -> StatusCounts {
        let mut counts = StatusCounts {
            unknown: 0,
            clear: 0,
            hit: 0,
        };
        for cell in &self.cells {
            match cell {
                CellStatus::Unknown => counts.unknown += 1,
                CellStatus::Clear => counts.clear += 1,
                CellStatus::Hit => counts.hit += 1,
            }
        }
        counts
    }

    /// Read-only view of the raw statuses, row-major.
    pub fn cells(&self) -> &[CellStatus] {
        &self.cells
    }
}
