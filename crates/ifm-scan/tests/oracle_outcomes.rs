use std::f64::consts::PI;

use ifm_core::{ErrorInfo, IfmError, Observation, Sampler};
use ifm_scan::{ProbeOracle, RunMetrics};

/// Replays scripted outcome bits and records what the oracle asked for.
#[derive(Default)]
struct ScriptedSampler {
    sequences: Vec<Vec<u8>>,
    singles: Vec<u8>,
    sequence_calls: usize,
    single_calls: usize,
    last_single_angle: Option<f64>,
}

impl Sampler for ScriptedSampler {
    fn run_sequence(&mut self, _angle: f64, _steps: u32) -> Result<Vec<u8>, IfmError> {
        self.sequence_calls += 1;
        Ok(self.sequences.remove(0))
    }

    fn run_single(&mut self, angle: f64) -> Result<u8, IfmError> {
        self.single_calls += 1;
        self.last_single_angle = Some(angle);
        Ok(self.singles.remove(0))
    }
}

/// Fails every request.
struct BrokenSampler;

impl Sampler for BrokenSampler {
    fn run_sequence(&mut self, _angle: f64, _steps: u32) -> Result<Vec<u8>, IfmError> {
        Err(IfmError::Sampler(ErrorInfo::new("down", "backend offline")))
    }

    fn run_single(&mut self, _angle: f64) -> Result<u8, IfmError> {
        Err(IfmError::Sampler(ErrorInfo::new("down", "backend offline")))
    }
}

fn oracle() -> ProbeOracle {
    ProbeOracle::new(PI / 310.0, 4).unwrap()
}

#[test]
fn target_branch_yields_hit_on_any_excited_bit() {
    let mut sampler = ScriptedSampler {
        sequences: vec![vec![0, 0, 1, 0], vec![0, 0, 0, 0]],
        ..Default::default()
    };
    let mut metrics = RunMetrics::new();

    let first = oracle().probe(true, &mut sampler, &mut metrics).unwrap();
    let second = oracle().probe(true, &mut sampler, &mut metrics).unwrap();

    assert_eq!(first, Observation::Hit);
    assert_eq!(second, Observation::Undetermined);
    // The suppressed procedure never touches the single-read path,
    // so Clear is unreachable for a target cell.
    assert_eq!(sampler.single_calls, 0);
    assert_eq!(sampler.sequence_calls, 2);
}

#[test]
fn absent_branch_yields_clear_on_excited_bit() {
    let mut sampler = ScriptedSampler {
        singles: vec![1, 0],
        ..Default::default()
    };
    let mut metrics = RunMetrics::new();

    let first = oracle().probe(false, &mut sampler, &mut metrics).unwrap();
    let second = oracle().probe(false, &mut sampler, &mut metrics).unwrap();

    assert_eq!(first, Observation::Clear);
    assert_eq!(second, Observation::Undetermined);
    // The accumulated procedure never runs a sequence, so Hit is
    // unreachable for a clear cell.
    assert_eq!(sampler.sequence_calls, 0);
    assert_eq!(sampler.single_calls, 2);
}

#[test]
fn absent_branch_accumulates_the_full_rotation() {
    let angle = PI / 310.0;
    let steps = 30;
    let mut sampler = ScriptedSampler {
        singles: vec![0],
        ..Default::default()
    };
    let mut metrics = RunMetrics::new();

    ProbeOracle::new(angle, steps)
        .unwrap()
        .probe(false, &mut sampler, &mut metrics)
        .unwrap();

    let seen = sampler.last_single_angle.unwrap();
    assert!((seen - angle * f64::from(steps)).abs() < 1e-12);
}

#[test]
fn every_invocation_counts_one_probe() {
    let mut sampler = ScriptedSampler {
        sequences: vec![vec![0, 0, 0, 0]],
        singles: vec![0],
        ..Default::default()
    };
    let mut metrics = RunMetrics::new();

    oracle().probe(true, &mut sampler, &mut metrics).unwrap();
    assert_eq!(metrics.probes_executed(), 1);
    oracle().probe(false, &mut sampler, &mut metrics).unwrap();
    assert_eq!(metrics.probes_executed(), 2);

    // A probe that dies in the backend is still counted.
    let err = oracle().probe(true, &mut BrokenSampler, &mut metrics);
    assert!(err.is_err());
    assert_eq!(metrics.probes_executed(), 3);
}

#[test]
fn malformed_sampler_output_is_a_sampler_failure() {
    let mut metrics = RunMetrics::new();

    let mut bad_bit = ScriptedSampler {
        sequences: vec![vec![0, 2, 0, 0]],
        ..Default::default()
    };
    let err = oracle().probe(true, &mut bad_bit, &mut metrics).unwrap_err();
    assert_eq!(err.info().code, "bad-outcome-bit");

    let mut truncated = ScriptedSampler {
        sequences: vec![vec![0, 0]],
        ..Default::default()
    };
    let err = oracle()
        .probe(true, &mut truncated, &mut metrics)
        .unwrap_err();
    assert_eq!(err.info().code, "sequence-length");
}

#[test]
fn oracle_rejects_invalid_parameters() {
    assert_eq!(
        ProbeOracle::new(0.0, 5).unwrap_err().info().code,
        "bad-angle"
    );
    assert_eq!(
        ProbeOracle::new(f64::NAN, 5).unwrap_err().info().code,
        "bad-angle"
    );
    assert_eq!(
        ProbeOracle::new(0.1, 0).unwrap_err().info().code,
        "zero-steps"
    );
}
