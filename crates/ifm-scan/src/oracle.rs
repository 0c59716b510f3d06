use ifm_core::{ErrorInfo, IfmError, Observation, Sampler};

use crate::metrics::RunMetrics;

/// The probabilistic probe classifier.
///
/// One oracle invocation runs exactly one of two sampling procedures,
/// selected by ground truth, and maps the outcome bits to a three-valued
/// observation. The construction is intentionally asymmetric: the
/// target-present branch can only reveal danger (`Hit`), the target-absent
/// branch can only confirm safety (`Clear`), and both overwhelmingly return
/// `Undetermined` for realistic parameters, which is what forces the
/// controller to re-probe over many sweeps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeOracle {
    angle: f64,
    steps: u32,
}

impl ProbeOracle {
    /// Creates an oracle; the angle must be finite and positive, the step
    /// count nonzero.
    pub fn new(angle: f64, steps: u32) -> Result<Self, IfmError> {
        if !angle.is_finite() || angle <= 0.0 {
            return Err(IfmError::Config(
                ErrorInfo::new("bad-angle", "rotation angle must be finite and positive")
                    .with_context("angle", angle.to_string()),
            ));
        }
        if steps == 0 {
            return Err(IfmError::Config(ErrorInfo::new(
                "zero-steps",
                "observation cycle requires at least one step",
            )));
        }
        Ok(Self { angle, steps })
    }

    /// Per-step rotation half-angle.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Steps per observation cycle.
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Probes one cell.
    ///
    /// Always consumes exactly one sampler invocation and increments
    /// `probes_executed` by one, before the sampler runs, so a probe that
    /// dies inside the backend is still counted.
    pub fn probe(
        &self,
        has_target: bool,
        sampler: &mut dyn Sampler,
        metrics: &mut RunMetrics,
    ) -> Result<Observation, IfmError> {
        metrics.note_probe();
        if has_target {
            // Suppressed procedure: a projective read interrupts every weak
            // step, so excitation stays improbable but cumulative. Any
            // excited read along the cycle triggers the target.
            let bits = sampler.run_sequence(self.angle, self.steps)?;
            if bits.len() != self.steps as usize {
                return Err(IfmError::Sampler(
                    ErrorInfo::new("sequence-length", "sampler returned a truncated sequence")
                        .with_context("expected", self.steps.to_string())
                        .with_context("actual", bits.len().to_string()),
                ));
            }
            validate_bits(&bits)?;
            if bits.iter().any(|&bit| bit == 1) {
                Ok(Observation::Hit)
            } else {
                Ok(Observation::Undetermined)
            }
        } else {
            // Accumulated procedure: the rotation builds up uninterrupted
            // across the whole cycle before the single read.
            let bit = sampler.run_single(self.angle * f64::from(self.steps))?;
            validate_bits(&[bit])?;
            if bit == 1 {
                Ok(Observation::Clear)
            } else {
                Ok(Observation::Undetermined)
            }
        }
    }
}

fn validate_bits(bits: &[u8]) -> Result<(), IfmError> {
    for &bit in bits {
        if bit > 1 {
            return Err(IfmError::Sampler(
                ErrorInfo::new("bad-outcome-bit", "outcome bits must be 0 or 1")
                    .with_context("bit", bit.to_string()),
            ));
        }
    }
    Ok(())
}
