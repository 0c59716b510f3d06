use ifm_core::{CellStatus, SchemaVersion};
use sha2::{Digest, Sha256};

use crate::result::ResultGrid;
use crate::target::TargetGrid;

fn update_header(hasher: &mut Sha256, version: SchemaVersion, dim: usize) {
    hasher.update((version.major as u64).to_le_bytes());
    hasher.update((version.minor as u64).to_le_bytes());
    hasher.update((version.patch as u64).to_le_bytes());
    hasher.update((dim as u64).to_le_bytes());
}

fn finish_hex(hasher: Sha256) -> String {
    hasher
        .finalize()
        .iter()
        .map(|byte| format!("{:02x}", byte))
        .collect::<String>()
}

/// Computes the canonical structural hash for a target grid.
pub fn canonical_target_hash(grid: &TargetGrid) -> String {
    let mut hasher = Sha256::new();
    update_header(&mut hasher, crate::serde::GRID_SCHEMA, grid.board().dim());
    for &cell in grid.cells() {
        hasher.update([u8::from(cell)]);
    }
    finish_hex(hasher)
}

/// Computes the canonical structural hash for a result grid.
pub fn canonical_result_hash(grid: &ResultGrid) -> String {
    let mut hasher = Sha256::new();
    update_header(&mut hasher, crate::serde::GRID_SCHEMA, grid.board().dim());
    for &cell in grid.cells() {
        hasher.update([status_tag(cell)]);
    }
    finish_hex(hasher)
}

fn status_tag(status: CellStatus) -> u8 {
    match status {
        CellStatus::Unknown => 0,
        CellStatus::Hit => 1,
        CellStatus::Clear => 2,
    }
}
