//! ASCII rendering of grids for terminal reports.

use ifm_core::CellStatus;

use crate::result::ResultGrid;
use crate::target::TargetGrid;

/// Renders the ground-truth placement: `X` target, `.` empty.
pub fn render_targets(grid: &TargetGrid) -> String {
    let dim = grid.board().dim();
    let mut out = String::with_capacity(grid.cells().len() * 2);
    for (index, &cell) in grid.cells().iter().enumerate() {
        out.push(if cell { 'X' } else { '.' });
        push_separator(&mut out, index, dim);
    }
    out
}

/// Renders the survey outcome: `X` hit, `-` confirmed clear, `?` unresolved.
///
/// A `?` over a true target at the end of a run is a located-but-untriggered
/// target.
pub fn render_results(grid: &ResultGrid) -> String {
    let dim = grid.board().dim();
    let mut out = String::with_capacity(grid.cells().len() * 2);
    for (index, &status) in grid.cells().iter().enumerate() {
        out.push(match status {
            CellStatus::Hit => 'X',
            CellStatus::Clear => '-',
            CellStatus::Unknown => '?',
        });
        push_separator(&mut out, index, dim);
    }
    out
}

fn push_separator(out: &mut String, index: usize, dim: usize) {
    if (index + 1) % dim == 0 {
        out.push('\n');
    } else {
        out.push(' ');
    }
}
