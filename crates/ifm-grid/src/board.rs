use ifm_core::{Coord, ErrorInfo, IfmError};

/// Smallest supported board dimension.
pub const MIN_DIM: usize = 3;
/// Largest supported board dimension.
pub const MAX_DIM: usize = 10;

/// Square board geometry for a survey run.
///
/// The board fixes the row-major visiting order used by the scan controller;
/// coordinates are always interpreted against a validated dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    dim: usize,
}

impl Board {
    /// Creates a board, rejecting dimensions outside `[MIN_DIM, MAX_DIM]`.
    pub fn new(dim: usize) -> Result<Self, IfmError> {
        if !(MIN_DIM..=MAX_DIM).contains(&dim) {
            return Err(IfmError::Config(
                ErrorInfo::new("dim-out-of-range", "board dimension outside supported bounds")
                    .with_context("dim", dim.to_string())
                    .with_context("min", MIN_DIM.to_string())
                    .with_context("max", MAX_DIM.to_string()),
            ));
        }
        Ok(Self { dim })
    }

    /// Returns the board dimension.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Returns the total number of cells, `dim * dim`.
    pub fn cell_count(&self) -> usize {
        self.dim * self.dim
    }

    /// Iterates all coordinates in row-major order: row 0 column 0 first.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        let dim = self.dim;
        (0..self.cell_count()).map(move |index| Coord::from_linear(index, dim))
    }

    /// Whether the coordinate lies on this board.
    pub fn contains(&self, coord: Coord) -> bool {
        coord.row < self.dim && coord.col < self.dim
    }
}
