#![deny(missing_docs)]
#![doc = "Sampler backends for the ifm survey engine."]

//! Two implementations of the [`ifm_core::Sampler`] capability: an
//! always-available local statistical emulator and an in-process emulation
//! of a queued remote device, plus the selection/fallback logic that picks
//! between them before a run starts.

/// Noise-free local emulator.
pub mod local;
/// Queued device emulation over a worker thread.
pub mod queue;
/// Device registry and backend selection.
pub mod registry;

pub use local::LocalSampler;
pub use queue::QueuedSampler;
pub use registry::{select_backend, BackendConfig, BackendSelection, DEFAULT_DEVICE};
