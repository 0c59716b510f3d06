use std::f64::consts::PI;
use std::fs;
use std::path::{Path, PathBuf};

use ifm_core::{ErrorInfo, IfmError};
use ifm_grid::{MAX_DIM, MIN_DIM};
use serde::{Deserialize, Serialize};

/// Parameters governing a survey run, loadable from YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Board dimension and target count.
    pub grid: GridConfig,
    /// Oracle rotation parameters.
    #[serde(default)]
    pub probe: ProbeConfig,
    /// Master seed and substream policy.
    #[serde(default)]
    pub seed_policy: SeedPolicy,
    /// Output directory configuration.
    #[serde(default)]
    pub output: OutputConfig,
}

impl RunConfig {
    /// Creates a configuration with default probe/seed/output sections.
    pub fn new(dim: usize, target_count: usize) -> Self {
        Self {
            grid: GridConfig { dim, target_count },
            probe: ProbeConfig::default(),
            seed_policy: SeedPolicy::default(),
            output: OutputConfig::default(),
        }
    }

    /// Total number of cells on the configured board.
    pub fn cell_count(&self) -> usize {
        self.grid.dim * self.grid.dim
    }

    /// Validates every section against its declared range.
    pub fn validate(&self) -> Result<(), IfmError> {
        if !(MIN_DIM..=MAX_DIM).contains(&self.grid.dim) {
            return Err(IfmError::Config(
                ErrorInfo::new("dim-out-of-range", "board dimension outside supported bounds")
                    .with_context("dim", self.grid.dim.to_string())
                    .with_context("min", MIN_DIM.to_string())
                    .with_context("max", MAX_DIM.to_string()),
            ));
        }
        if self.grid.target_count < 1 || self.grid.target_count > self.cell_count() {
            return Err(IfmError::Config(
                ErrorInfo::new("targets-out-of-range", "target count outside valid range")
                    .with_context("target_count", self.grid.target_count.to_string())
                    .with_context("cell_count", self.cell_count().to_string())
                    .with_hint("pass a value between 1 and dim^2"),
            ));
        }
        if !self.probe.angle.is_finite() || self.probe.angle <= 0.0 {
            return Err(IfmError::Config(
                ErrorInfo::new("bad-angle", "rotation angle must be finite and positive")
                    .with_context("angle", self.probe.angle.to_string()),
            ));
        }
        if self.probe.steps == 0 {
            return Err(IfmError::Config(ErrorInfo::new(
                "zero-steps",
                "observation cycle requires at least one step",
            )));
        }
        Ok(())
    }

    /// Loads a configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self, IfmError> {
        let contents = fs::read_to_string(path).map_err(|err| {
            IfmError::Serde(
                ErrorInfo::new("config-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        serde_yaml::from_str(&contents).map_err(|err| {
            IfmError::Serde(
                ErrorInfo::new("config-parse", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })
    }
}

/// Board dimension and target count for the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Board dimension, `MIN_DIM..=MAX_DIM`.
    pub dim: usize,
    /// Number of hidden targets, `1..=dim²`.
    pub target_count: usize,
}

/// Oracle rotation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Half-angle of one weak rotation step, in radians.
    #[serde(default = "default_angle")]
    pub angle: f64,
    /// Number of steps in one observation cycle.
    #[serde(default = "default_steps")]
    pub steps: u32,
}

fn default_angle() -> f64 {
    PI / 310.0
}

fn default_steps() -> u32 {
    30
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            angle: default_angle(),
            steps: default_steps(),
        }
    }
}

/// Deterministic seeding configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedPolicy {
    /// Master seed used for the run.
    #[serde(default = "default_master_seed")]
    pub master_seed: u64,
    /// Optional label used when deriving substream seeds (documented in manifests).
    #[serde(default)]
    pub label: Option<String>,
}

fn default_master_seed() -> u64 {
    0x05EE_D5EE_DD15_5EED_u64
}

impl Default for SeedPolicy {
    fn default() -> Self {
        Self {
            master_seed: default_master_seed(),
            label: None,
        }
    }
}

/// Output directory layout configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Root directory for run artefacts. Created if it does not exist.
    #[serde(default)]
    pub run_directory: Option<PathBuf>,
    /// Metrics filename relative to `run_directory`.
    #[serde(default = "default_metrics_filename")]
    pub metrics_file: PathBuf,
    /// Manifest filename relative to `run_directory`.
    #[serde(default = "default_manifest_filename")]
    pub manifest_file: PathBuf,
    /// Subdirectory for final grid exports.
    #[serde(default = "default_grids_dir")]
    pub grids_dir: PathBuf,
}

fn default_metrics_filename() -> PathBuf {
    PathBuf::from("metrics.csv")
}

fn default_manifest_filename() -> PathBuf {
    PathBuf::from("manifest.json")
}

fn default_grids_dir() -> PathBuf {
    PathBuf::from("grids")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            run_directory: None,
            metrics_file: default_metrics_filename(),
            manifest_file: default_manifest_filename(),
            grids_dir: default_grids_dir(),
        }
    }
}
