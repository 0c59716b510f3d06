use ifm_core::{Coord, ErrorInfo, IfmError, RngHandle};

use crate::board::Board;

/// Ground-truth target placement, immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetGrid {
    board: Board,
    cells: Vec<bool>,
    target_count: usize,
}

impl TargetGrid {
    /// Places `target_count` targets uniformly at random without replacement.
    ///
    /// Accept/reject sampling: draw a uniform coordinate, keep it only if
    /// the cell is still empty. Expected O(target_count) draws for sparse
    /// placements, degrading as the grid fills; the bounded board size keeps
    /// the worst case small.
    pub fn place(board: Board, target_count: usize, rng: &mut RngHandle) -> Result<Self, IfmError> {
        validate_target_count(board, target_count)?;
        let mut cells = vec![false; board.cell_count()];
        let mut placed = 0;
        while placed < target_count {
            let row = rng.draw_index(board.dim());
            let col = rng.draw_index(board.dim());
            let index = Coord::new(row, col).linear(board.dim());
            if !cells[index] {
                cells[index] = true;
                placed += 1;
            }
        }
        Ok(Self {
            board,
            cells,
            target_count,
        })
    }

    /// Builds a grid from an explicit cell mask. Intended for fixtures and
    /// deserialization; the mask length must match the board.
    pub fn from_cells(board: Board, cells: Vec<bool>) -> Result<Self, IfmError> {
        if cells.len() != board.cell_count() {
            return Err(IfmError::Grid(
                ErrorInfo::new("cell-mask-size", "target mask does not cover the board")
                    .with_context("expected", board.cell_count().to_string())
                    .with_context("actual", cells.len().to_string()),
            ));
        }
        let target_count = cells.iter().filter(|&&cell| cell).count();
        validate_target_count(board, target_count)?;
        Ok(Self {
            board,
            cells,
            target_count,
        })
    }

    /// Returns the board this grid was placed on.
    pub fn board(&self) -> Board {
        self.board
    }

    /// Returns the number of targets placed.
    pub fn target_count(&self) -> usize {
        self.target_count
    }

    /// Ground truth for one cell.
    pub fn has_target(&self, coord: Coord) -> bool {
        self.cells[coord.linear(self.board.dim())]
    }

    /// Read-only view of the raw mask, row-major.
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }
}

fn validate_target_count(board: Board, target_count: usize) -> Result<(), IfmError> {
    if target_count < 1 || target_count > board.cell_count() {
        return Err(IfmError::Config(
            ErrorInfo::new("targets-out-of-range", "target count outside valid range")
                .with_context("target_count", target_count.to_string())
                .with_context("cell_count", board.cell_count().to_string())
                .with_hint("pass a value between 1 and dim^2"),
        ));
    }
    Ok(())
}
