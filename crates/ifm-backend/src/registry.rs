//! Device registry and backend selection.

use ifm_core::{ErrorInfo, IfmError, Sampler};
use serde::{Deserialize, Serialize};

use crate::local::LocalSampler;
use crate::queue::QueuedSampler;

/// Profile of an emulated queued device.
#[derive(Debug, Clone, Copy)]
pub struct DeviceProfile {
    /// Registry name of the device.
    pub name: &'static str,
    /// Substream index used to derive the device's own seed.
    pub substream: u64,
}

const DEVICES: &[DeviceProfile] = &[
    DeviceProfile {
        name: "emu-1",
        substream: 0x51,
    },
    DeviceProfile {
        name: "emu-2",
        substream: 0x52,
    },
];

/// Default device used when a queued backend is requested without a name.
pub const DEFAULT_DEVICE: &str = "emu-1";

/// Looks up a device profile by name.
pub fn device_profile(name: &str) -> Result<DeviceProfile, IfmError> {
    DEVICES
        .iter()
        .copied()
        .find(|profile| profile.name == name)
        .ok_or_else(|| {
            IfmError::Sampler(
                ErrorInfo::new("unknown-device", "device is not in the registry")
                    .with_context("device", name.to_string())
                    .with_hint(format!("known devices: {}", known_devices().join(", "))),
            )
        })
}

/// Names of all registered devices.
pub fn known_devices() -> Vec<&'static str> {
    DEVICES.iter().map(|profile| profile.name).collect()
}

/// Which sampling backend a run should use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum BackendConfig {
    /// Always-available local emulator.
    Local,
    /// Queued device; `device` defaults to [`DEFAULT_DEVICE`].
    Queued {
        /// Registry name of the device to connect to.
        #[serde(default)]
        device: Option<String>,
    },
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig::Local
    }
}

/// Outcome of backend selection, reported to the user before probing starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendSelection {
    /// The local emulator was requested and used.
    Local,
    /// The queued device was reached.
    Queued {
        /// Connected device name.
        device: String,
    },
    /// The queued device was unreachable; the local emulator was substituted
    /// before any probing began.
    FallbackLocal {
        /// Device that could not be reached.
        device: String,
        /// Diagnostic from the failed connection attempt.
        reason: String,
    },
}

/// Resolves a backend configuration into a ready sampler.
///
/// The substitution contract: when a queued device cannot be reached, the
/// local emulator silently takes its place and the selection records why.
/// Consumers of the returned sampler cannot tell the difference.
pub fn select_backend(config: &BackendConfig, seed: u64) -> (Box<dyn Sampler>, BackendSelection) {
    match config {
        BackendConfig::Local => (
            Box::new(LocalSampler::from_seed(seed)),
            BackendSelection::Local,
        ),
        BackendConfig::Queued { device } => {
            let name = device.as_deref().unwrap_or(DEFAULT_DEVICE);
            match QueuedSampler::connect(name, seed) {
                Ok(sampler) => (
                    Box::new(sampler),
                    BackendSelection::Queued {
                        device: name.to_string(),
                    },
                ),
                Err(err) => (
                    Box::new(LocalSampler::from_seed(seed)),
                    BackendSelection::FallbackLocal {
                        device: name.to_string(),
                        reason: err.info().message.clone(),
                    },
                ),
            }
        }
    }
}
