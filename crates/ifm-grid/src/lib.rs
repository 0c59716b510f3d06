#![deny(missing_docs)]
#![doc = "Board geometry, target placement, and result tracking for survey runs."]

/// Board dimensions and row-major coordinate iteration.
pub mod board;
/// Canonical structural hashes for grid artifacts.
pub mod hash;
/// ASCII rendering for terminal reports.
pub mod render;
/// Tri-state result grid with monotone transitions.
pub mod result;
/// JSON payloads for grid artifacts.
pub mod serde;
/// Immutable ground-truth target placement.
pub mod target;

pub use board::{Board, MAX_DIM, MIN_DIM};
pub use hash::{canonical_result_hash, canonical_target_hash};
pub use result::{ResultGrid, StatusCounts};
pub use target::TargetGrid;
