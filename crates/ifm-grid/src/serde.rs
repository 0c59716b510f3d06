//! JSON payloads for grid artifacts.

use ifm_core::{CellStatus, Coord, ErrorInfo, IfmError, Observation, RunProvenance, SchemaVersion};
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::result::ResultGrid;
use crate::target::TargetGrid;

/// Schema version stamped into serialized grid payloads.
pub const GRID_SCHEMA: SchemaVersion = SchemaVersion::new(1, 0, 0);

#[derive(Debug, Serialize, Deserialize)]
struct SerializableTargetGrid {
    schema_version: SchemaVersion,
    provenance: RunProvenance,
    dim: usize,
    /// Row-major mask, one `0`/`1` per cell.
    cells: Vec<u8>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializableResultGrid {
    schema_version: SchemaVersion,
    provenance: RunProvenance,
    dim: usize,
    /// Row-major statuses: `-1` clear, `1` hit, `0` unknown.
    cells: Vec<i8>,
}

/// Serializes a target grid to a JSON string.
pub fn target_to_json(grid: &TargetGrid, provenance: &RunProvenance) -> Result<String, IfmError> {
    let payload = SerializableTargetGrid {
        schema_version: GRID_SCHEMA,
        provenance: provenance.clone(),
        dim: grid.board().dim(),
        cells: grid.cells().iter().map(|&cell| u8::from(cell)).collect(),
    };
    serde_json::to_string_pretty(&payload)
        .map_err(|err| IfmError::Serde(ErrorInfo::new("json-serialize", err.to_string())))
}

/// Restores a target grid from a JSON string.
pub fn target_from_json(data: &str) -> Result<(TargetGrid, RunProvenance), IfmError> {
    let payload: SerializableTargetGrid = serde_json::from_str(data)
        .map_err(|err| IfmError::Serde(ErrorInfo::new("json-deserialize", err.to_string())))?;
    let board = Board::new(payload.dim)?;
    let mut cells = Vec::with_capacity(payload.cells.len());
    for &raw in &payload.cells {
        match raw {
            0 => cells.push(false),
            1 => cells.push(true),
            other => {
                return Err(IfmError::Serde(
                    ErrorInfo::new("target-cell-value", "target cells must be 0 or 1")
                        .with_context("value", other.to_string()),
                ))
            }
        }
    }
    Ok((TargetGrid::from_cells(board, cells)?, payload.provenance))
}

/// Serializes a result grid to a JSON string.
pub fn result_to_json(grid: &ResultGrid, provenance: &RunProvenance) -> Result<String, IfmError> {
    let payload = SerializableResultGrid {
        schema_version: GRID_SCHEMA,
        provenance: provenance.clone(),
        dim: grid.board().dim(),
        cells: grid
            .cells()
            .iter()
            .map(|&status| match status {
                CellStatus::Unknown => 0,
                CellStatus::Hit => 1,
                CellStatus::Clear => -1,
            })
            .collect(),
    };
    serde_json::to_string_pretty(&payload)
        .map_err(|err| IfmError::Serde(ErrorInfo::new("json-serialize", err.to_string())))
}

/// Restores a result grid from a JSON string.
pub fn result_from_json(data: &str) -> Result<(ResultGrid, RunProvenance), IfmError> {
    let payload: SerializableResultGrid = serde_json::from_str(data)
        .map_err(|err| IfmError::Serde(ErrorInfo::new("json-deserialize", err.to_string())))?;
    let board = Board::new(payload.dim)?;
    if payload.cells.len() != board.cell_count() {
        return Err(IfmError::Serde(
            ErrorInfo::new("result-cell-count", "result payload does not cover the board")
                .with_context("expected", board.cell_count().to_string())
                .with_context("actual", payload.cells.len().to_string()),
        ));
    }
    let mut grid = ResultGrid::new(board);
    for (index, &raw) in payload.cells.iter().enumerate() {
        let coord = Coord::from_linear(index, board.dim());
        match raw {
            0 => {}
            1 => {
                grid.resolve(coord, Observation::Hit)?;
            }
            -1 => {
                grid.resolve(coord, Observation::Clear)?;
            }
            other => {
                return Err(IfmError::Serde(
                    ErrorInfo::new("result-cell-value", "result cells must be -1, 0 or 1")
                        .with_context("value", other.to_string()),
                ))
            }
        }
    }
    Ok((grid, payload.provenance))
}
