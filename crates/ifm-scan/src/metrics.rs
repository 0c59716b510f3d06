use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Run-wide counters, incremented one probe at a time.
///
/// All three counters are monotone; the struct exposes no way to decrement
/// or reset them once a run is underway.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunMetrics {
    probes_executed: u64,
    targets_hit: usize,
    clear_confirmed: usize,
}

impl RunMetrics {
    /// Creates zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one oracle invocation, decisive or not.
    pub fn note_probe(&mut self) {
        self.probes_executed += 1;
    }

    /// Counts one cell transitioned to `Hit`.
    pub fn note_hit(&mut self) {
        self.targets_hit += 1;
    }

    /// Counts one cell transitioned to `Clear`.
    pub fn note_clear(&mut self) {
        self.clear_confirmed += 1;
    }

    /// Number of oracle invocations so far.
    pub fn probes_executed(&self) -> u64 {
        self.probes_executed
    }

    /// Number of cells transitioned to `Hit`.
    pub fn targets_hit(&self) -> usize {
        self.targets_hit
    }

    /// Number of cells transitioned to `Clear`.
    pub fn clear_confirmed(&self) -> usize {
        self.clear_confirmed
    }

    /// Termination predicate: every truly-clear cell has been confirmed.
    ///
    /// Holds exactly when `clear_confirmed + target_count >= cell_count`,
    /// independent of how many targets were hit.
    pub fn satisfied(&self, target_count: usize, cell_count: usize) -> bool {
        self.clear_confirmed + target_count >= cell_count
    }

    /// Targets located but never triggered: `target_count - targets_hit`.
    pub fn targets_located(&self, target_count: usize) -> usize {
        target_count.saturating_sub(self.targets_hit)
    }
}

/// Cumulative counters snapshotted at the end of one completed sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepSample {
    /// Zero-based sweep index.
    pub sweep: usize,
    /// Oracle invocations up to and including this sweep.
    pub probes_executed: u64,
    /// Cells hit so far.
    pub targets_hit: usize,
    /// Cells confirmed clear so far.
    pub clear_confirmed: usize,
    /// Cells still unresolved after this sweep.
    pub unresolved: usize,
}

/// Collects per-sweep samples and exports them as CSV.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MetricsRecorder {
    samples: Vec<SweepSample>,
}

impl MetricsRecorder {
    /// Creates a new recorder instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the cumulative counters at the end of a sweep.
    pub fn record_sweep(&mut self, sweep: usize, metrics: &RunMetrics, unresolved: usize) {
        self.samples.push(SweepSample {
            sweep,
            probes_executed: metrics.probes_executed(),
            targets_hit: metrics.targets_hit(),
            clear_confirmed: metrics.clear_confirmed(),
            unresolved,
        });
    }

    /// Returns an immutable view over the recorded samples.
    pub fn samples(&self) -> &[SweepSample] {
        &self.samples
    }

    /// Consumes the recorder, yielding its samples.
    pub fn into_samples(self) -> Vec<SweepSample> {
        self.samples
    }

    /// Writes the recorded samples to a CSV file.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let mut file = File::create(path)?;
        writeln!(file, "sweep,probes,hits,clears,unresolved")?;
        for sample in &self.samples {
            writeln!(
                file,
                "{},{},{},{},{}",
                sample.sweep,
                sample.probes_executed,
                sample.targets_hit,
                sample.clear_confirmed,
                sample.unresolved
            )?;
        }
        Ok(())
    }
}
