use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use ifm_core::{Coord, ErrorInfo, IfmError, Observation, RngHandle, RunProvenance, Sampler};
use ifm_grid::serde as grid_serde;
use ifm_grid::{canonical_result_hash, canonical_target_hash, Board, ResultGrid, TargetGrid};

use crate::config::RunConfig;
use crate::determinism;
use crate::manifest::{self, RunManifest};
use crate::metrics::{MetricsRecorder, RunMetrics, SweepSample};
use crate::oracle::ProbeOracle;

/// Controller state: a single one-way transition fires when the termination
/// invariant becomes true.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurveyState {
    /// Sweeping the grid, probing unresolved cells.
    Scanning,
    /// Every truly-clear cell has been confirmed; the run is over.
    Done,
}

/// One executed probe, as reported back to the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeRecord {
    /// Cell that was probed.
    pub coord: Coord,
    /// What the oracle returned.
    pub observation: Observation,
    /// Sweep the probe belonged to.
    pub sweep: usize,
}

/// Summary returned to callers after a run completes.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Ground-truth placement the run operated on.
    pub targets: TargetGrid,
    /// Final resolution grid.
    pub results: ResultGrid,
    /// Final counters.
    pub metrics: RunMetrics,
    /// Number of fully completed sweeps.
    pub sweeps_completed: usize,
    /// Per-sweep samples collected during the run.
    pub samples: Vec<SweepSample>,
    /// Canonical hash of the target grid.
    pub target_hash: String,
    /// Canonical hash of the final result grid.
    pub result_hash: String,
    /// Metrics CSV written during the run.
    pub metrics_path: Option<PathBuf>,
    /// Manifest path, if emitted.
    pub manifest_path: Option<PathBuf>,
    /// Grid artifact files written during the run.
    pub grid_paths: Vec<PathBuf>,
}

impl RunSummary {
    /// Targets located but never triggered.
    pub fn targets_located(&self) -> usize {
        self.metrics.targets_located(self.targets.target_count())
    }
}

/// The scan controller.
///
/// Visits coordinates in row-major order, probes every still-unresolved
/// cell, and re-checks the termination invariant after every single probe —
/// the run stops mid-sweep the moment it is satisfied. There is no fixed
/// iteration bound; termination relies on each truly-clear cell having a
/// fixed nonzero per-probe chance of resolving.
#[derive(Debug)]
pub struct Survey {
    board: Board,
    targets: TargetGrid,
    results: ResultGrid,
    oracle: ProbeOracle,
    metrics: RunMetrics,
    recorder: MetricsRecorder,
    state: SurveyState,
    cursor: usize,
    sweeps_completed: usize,
}

impl Survey {
    /// Builds a survey, placing targets from the configured seed.
    pub fn new(config: &RunConfig) -> Result<Self, IfmError> {
        config.validate()?;
        let board = Board::new(config.grid.dim)?;
        let mut rng =
            RngHandle::from_seed(determinism::placement_seed(config.seed_policy.master_seed));
        let targets = TargetGrid::place(board, config.grid.target_count, &mut rng)?;
        Self::with_targets(config, targets)
    }

    /// Builds a survey over an externally fixed placement.
    pub fn with_targets(config: &RunConfig, targets: TargetGrid) -> Result<Self, IfmError> {
        config.validate()?;
        let board = targets.board();
        if board.dim() != config.grid.dim {
            return Err(IfmError::Config(
                ErrorInfo::new("dim-mismatch", "placement does not match the configured board")
                    .with_context("config_dim", config.grid.dim.to_string())
                    .with_context("grid_dim", board.dim().to_string()),
            ));
        }
        if targets.target_count() != config.grid.target_count {
            return Err(IfmError::Config(
                ErrorInfo::new("target-count-mismatch", "placement does not match the configuration")
                    .with_context("config_targets", config.grid.target_count.to_string())
                    .with_context("grid_targets", targets.target_count().to_string()),
            ));
        }
        let oracle = ProbeOracle::new(config.probe.angle, config.probe.steps)?;
        let results = ResultGrid::new(board);
        let metrics = RunMetrics::new();
        // An all-target board satisfies the invariant before any probe.
        let state = if metrics.satisfied(targets.target_count(), board.cell_count()) {
            SurveyState::Done
        } else {
            SurveyState::Scanning
        };
        Ok(Self {
            board,
            targets,
            results,
            oracle,
            metrics,
            recorder: MetricsRecorder::new(),
            state,
            cursor: 0,
            sweeps_completed: 0,
        })
    }

    /// Current controller state.
    pub fn state(&self) -> SurveyState {
        self.state
    }

    /// Ground-truth placement.
    pub fn targets(&self) -> &TargetGrid {
        &self.targets
    }

    /// Resolution grid so far.
    pub fn results(&self) -> &ResultGrid {
        &self.results
    }

    /// Counters so far.
    pub fn metrics(&self) -> &RunMetrics {
        &self.metrics
    }

    /// Per-sweep samples recorded so far.
    pub fn recorder(&self) -> &MetricsRecorder {
        &self.recorder
    }

    /// Number of fully completed sweeps so far.
    pub fn sweeps_completed(&self) -> usize {
        self.sweeps_completed
    }

    /// Probes the next unresolved cell, in row-major cursor order.
    ///
    /// Returns the executed probe, or `Ok(None)` once the survey is done.
    /// Wrapping past the last cell completes a sweep and records a metrics
    /// sample. A sampler failure aborts the probe and is returned as-is; the
    /// controller performs no retry of its own.
    pub fn step(&mut self, sampler: &mut dyn Sampler) -> Result<Option<ProbeRecord>, IfmError> {
        if self.state == SurveyState::Done {
            return Ok(None);
        }
        let cell_count = self.board.cell_count();
        let mut wrapped = 0;
        loop {
            if self.cursor == cell_count {
                self.complete_sweep();
                wrapped += 1;
                if wrapped > 1 {
                    // Scanning implies an unresolved truly-clear cell exists.
                    return Err(IfmError::Grid(ErrorInfo::new(
                        "scan-stalled",
                        "no unresolved cells remain while the survey is still scanning",
                    )));
                }
            }
            let coord = Coord::from_linear(self.cursor, self.board.dim());
            self.cursor += 1;
            if self.results.status(coord).is_decisive() {
                continue;
            }
            let sweep = self.sweeps_completed;
            let has_target = self.targets.has_target(coord);
            let observation = self.oracle.probe(has_target, sampler, &mut self.metrics)?;
            if self.results.resolve(coord, observation)? {
                match observation {
                    Observation::Hit => self.metrics.note_hit(),
                    Observation::Clear => self.metrics.note_clear(),
                    Observation::Undetermined => {}
                }
                if self
                    .metrics
                    .satisfied(self.targets.target_count(), cell_count)
                {
                    // Mid-sweep stop is authoritative: leftover unknown
                    // cells of this pass are not probed again.
                    self.state = SurveyState::Done;
                }
            }
            return Ok(Some(ProbeRecord {
                coord,
                observation,
                sweep,
            }));
        }
    }

    /// Steps until the survey is done.
    pub fn run(&mut self, sampler: &mut dyn Sampler) -> Result<(), IfmError> {
        while self.step(sampler)?.is_some() {}
        Ok(())
    }

    /// Consumes the survey into its final summary (no artifacts written).
    pub fn into_summary(self) -> RunSummary {
        let target_hash = canonical_target_hash(&self.targets);
        let result_hash = canonical_result_hash(&self.results);
        RunSummary {
            targets: self.targets,
            results: self.results,
            metrics: self.metrics,
            sweeps_completed: self.sweeps_completed,
            samples: self.recorder.into_samples(),
            target_hash,
            result_hash,
            metrics_path: None,
            manifest_path: None,
            grid_paths: Vec::new(),
        }
    }

    fn complete_sweep(&mut self) {
        self.recorder.record_sweep(
            self.sweeps_completed,
            &self.metrics,
            self.results.unknown_count(),
        );
        self.sweeps_completed += 1;
        self.cursor = 0;
    }
}

/// Runs a survey from scratch with the provided configuration and sampler,
/// writing run artifacts when an output directory is configured.
pub fn run(config: &RunConfig, sampler: &mut dyn Sampler) -> Result<RunSummary, IfmError> {
    let mut survey = Survey::new(config)?;
    survey.run(sampler)?;
    finalize(config, survey)
}

/// Writes configured artifacts and consumes the survey into its summary.
///
/// Intended for drivers that step the survey themselves (progress display)
/// and still want the artifact layout of [`run`].
pub fn finalize(config: &RunConfig, survey: Survey) -> Result<RunSummary, IfmError> {
    let artifacts = match &config.output.run_directory {
        Some(run_dir) => Some(write_artifacts(config, run_dir, &survey)?),
        None => None,
    };
    let mut summary = survey.into_summary();
    if let Some((metrics_path, manifest_path, grid_paths)) = artifacts {
        summary.metrics_path = Some(metrics_path);
        summary.manifest_path = Some(manifest_path);
        summary.grid_paths = grid_paths;
    }
    Ok(summary)
}

fn write_artifacts(
    config: &RunConfig,
    run_dir: &Path,
    survey: &Survey,
) -> Result<(PathBuf, PathBuf, Vec<PathBuf>), IfmError> {
    fs::create_dir_all(run_dir).map_err(|err| {
        IfmError::Serde(
            ErrorInfo::new("run-dir-mkdir", err.to_string())
                .with_context("path", run_dir.display().to_string()),
        )
    })?;

    let metrics_path = run_dir.join(&config.output.metrics_file);
    survey.recorder().write_csv(&metrics_path).map_err(|err| {
        IfmError::Serde(
            ErrorInfo::new("metrics-write", err.to_string())
                .with_context("path", metrics_path.display().to_string()),
        )
    })?;

    let created_at = Utc::now().to_rfc3339();
    let target_hash = canonical_target_hash(survey.targets());
    let result_hash = canonical_result_hash(survey.results());
    let provenance = RunProvenance {
        config_hash: manifest::config_hash(config)?,
        target_hash: target_hash.clone(),
        seed: config.seed_policy.master_seed,
        created_at: created_at.clone(),
        tool_versions: [(
            "ifm-scan".to_string(),
            env!("CARGO_PKG_VERSION").to_string(),
        )]
        .into_iter()
        .collect(),
    };

    let grids_dir = run_dir.join(&config.output.grids_dir);
    fs::create_dir_all(&grids_dir).map_err(|err| {
        IfmError::Serde(
            ErrorInfo::new("grids-mkdir", err.to_string())
                .with_context("path", grids_dir.display().to_string()),
        )
    })?;
    let target_path = grids_dir.join("targets.json");
    write_text(
        &target_path,
        grid_serde::target_to_json(survey.targets(), &provenance)?,
    )?;
    let result_path = grids_dir.join("results.json");
    write_text(
        &result_path,
        grid_serde::result_to_json(survey.results(), &provenance)?,
    )?;

    let manifest_path = run_dir.join(&config.output.manifest_file);
    let relative = |path: &Path| {
        path.strip_prefix(run_dir)
            .ok()
            .map(|rel| rel.to_path_buf())
    };
    let manifest = RunManifest {
        config: config.clone(),
        master_seed: config.seed_policy.master_seed,
        seed_label: config.seed_policy.label.clone(),
        target_hash,
        result_hash,
        metrics_file: relative(&metrics_path),
        grid_files: [&target_path, &result_path]
            .into_iter()
            .filter_map(|path| relative(path))
            .collect(),
        created_at,
    };
    manifest.write(&manifest_path)?;

    Ok((metrics_path, manifest_path, vec![target_path, result_path]))
}

fn write_text(path: &Path, contents: String) -> Result<(), IfmError> {
    fs::write(path, contents).map_err(|err| {
        IfmError::Serde(
            ErrorInfo::new("artifact-write", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })
}
