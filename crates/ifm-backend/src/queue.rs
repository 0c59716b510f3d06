//! Queued remote-device emulation.
//!
//! The emulated device lives on a dedicated worker thread that owns the
//! statistical model; callers submit observation jobs over a channel and
//! block on the outcome message. This mirrors the submit-and-wait shape of a
//! real queued sampling service while staying entirely in-process. The
//! worker is the only place outcomes are produced; a dead worker surfaces as
//! a sampler failure on the next job rather than a panic.

use std::sync::mpsc;
use std::thread::{self, JoinHandle};

use ifm_core::{derive_substream_seed, ErrorInfo, IfmError, Sampler};

use crate::local::LocalSampler;
use crate::registry;

enum Job {
    Sequence { angle: f64, steps: u32 },
    Single { angle: f64 },
    Shutdown,
}

type JobOutcome = Result<Vec<u8>, IfmError>;

/// Sampler backed by an emulated queued device.
#[derive(Debug)]
pub struct QueuedSampler {
    device: String,
    jobs: mpsc::Sender<Job>,
    outcomes: mpsc::Receiver<JobOutcome>,
    handle: Option<JoinHandle<()>>,
}

impl QueuedSampler {
    /// Connects to a named device from the registry.
    ///
    /// Connection fails for unknown device names; the caller is expected to
    /// substitute the local emulator in that case (see
    /// [`crate::select_backend`]).
    pub fn connect(device: &str, seed: u64) -> Result<Self, IfmError> {
        let profile = registry::device_profile(device)?;
        let worker_seed = derive_substream_seed(seed, profile.substream);
        let (job_tx, job_rx) = mpsc::channel::<Job>();
        let (outcome_tx, outcome_rx) = mpsc::channel::<JobOutcome>();

        let handle = thread::Builder::new()
            .name(format!("ifm-device-{}", profile.name))
            .spawn(move || {
                let mut model = LocalSampler::from_seed(worker_seed);
                while let Ok(job) = job_rx.recv() {
                    let outcome = match job {
                        Job::Sequence { angle, steps } => model.run_sequence(angle, steps),
                        Job::Single { angle } => model.run_single(angle).map(|bit| vec![bit]),
                        Job::Shutdown => break,
                    };
                    if outcome_tx.send(outcome).is_err() {
                        break;
                    }
                }
            })
            .map_err(|err| {
                IfmError::Sampler(
                    ErrorInfo::new("worker-spawn", err.to_string())
                        .with_context("device", device.to_string()),
                )
            })?;

        Ok(Self {
            device: device.to_string(),
            jobs: job_tx,
            outcomes: outcome_rx,
            handle: Some(handle),
        })
    }

    /// Name of the connected device.
    pub fn device(&self) -> &str {
        &self.device
    }

    /// Stops the worker and joins its thread. Jobs submitted afterwards fail.
    pub fn shutdown(&mut self) {
        let _ = self.jobs.send(Job::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    fn submit(&mut self, job: Job) -> Result<Vec<u8>, IfmError> {
        self.jobs.send(job).map_err(|_| self.worker_gone())?;
        self.outcomes.recv().map_err(|_| self.worker_gone())?
    }

    fn worker_gone(&self) -> IfmError {
        IfmError::Sampler(
            ErrorInfo::new("worker-gone", "device worker disconnected")
                .with_context("device", self.device.clone())
                .with_hint("reconnect the backend and retry the probe"),
        )
    }
}

impl Sampler for QueuedSampler {
    fn run_sequence(&mut self, angle: f64, steps: u32) -> Result<Vec<u8>, IfmError> {
        self.submit(Job::Sequence { angle, steps })
    }

    fn run_single(&mut self, angle: f64) -> Result<u8, IfmError> {
        let bits = self.submit(Job::Single { angle })?;
        bits.first().copied().ok_or_else(|| {
            IfmError::Sampler(
                ErrorInfo::new("empty-outcome", "device returned no outcome bit")
                    .with_context("device", self.device.clone()),
            )
        })
    }
}

impl Drop for QueuedSampler {
    fn drop(&mut self) {
        self.shutdown();
    }
}
