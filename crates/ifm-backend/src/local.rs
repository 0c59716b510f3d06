use ifm_core::{ErrorInfo, IfmError, RngHandle, Sampler};

/// Noise-free local emulator of the two-level observation procedures.
///
/// Exact Born statistics for a system starting in the ground state: one weak
/// rotation of half-angle `a` excites with probability `sin²(a)`. Projective
/// reads collapse the state, so a sequence is a Markov chain over the
/// collapsed bit — once excited, the next read stays excited with
/// probability `cos²(a)`.
#[derive(Debug, Clone)]
pub struct LocalSampler {
    rng: RngHandle,
}

impl LocalSampler {
    /// Creates an emulator drawing from the given deterministic seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: RngHandle::from_seed(seed),
        }
    }
}

impl Sampler for LocalSampler {
    fn run_sequence(&mut self, angle: f64, steps: u32) -> Result<Vec<u8>, IfmError> {
        validate_angle(angle)?;
        if steps == 0 {
            return Err(IfmError::Sampler(ErrorInfo::new(
                "zero-steps",
                "observation sequence requires at least one step",
            )));
        }
        let excite = angle.sin().powi(2);
        let hold = angle.cos().powi(2);
        let mut state = 0u8;
        let mut bits = Vec::with_capacity(steps as usize);
        for _ in 0..steps {
            let draw = self.rng.next_f64();
            state = if state == 0 {
                u8::from(draw < excite)
            } else {
                u8::from(draw < hold)
            };
            bits.push(state);
        }
        Ok(bits)
    }

    fn run_single(&mut self, angle: f64) -> Result<u8, IfmError> {
        validate_angle(angle)?;
        let excite = angle.sin().powi(2);
        Ok(u8::from(self.rng.next_f64() < excite))
    }
}

fn validate_angle(angle: f64) -> Result<(), IfmError> {
    if !angle.is_finite() || angle <= 0.0 {
        return Err(IfmError::Sampler(
            ErrorInfo::new("bad-angle", "rotation angle must be finite and positive")
                .with_context("angle", angle.to_string()),
        ));
    }
    Ok(())
}
