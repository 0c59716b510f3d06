use std::f64::consts::{FRAC_PI_2, PI};

use ifm_backend::LocalSampler;
use ifm_core::Sampler;

#[test]
fn sequences_are_reproducible_for_a_seed() {
    let angle = PI / 310.0;
    let mut sampler_a = LocalSampler::from_seed(77);
    let mut sampler_b = LocalSampler::from_seed(77);

    for _ in 0..50 {
        assert_eq!(
            sampler_a.run_sequence(angle, 30).unwrap(),
            sampler_b.run_sequence(angle, 30).unwrap()
        );
    }
}

#[test]
fn sequence_has_requested_length_and_valid_bits() {
    let mut sampler = LocalSampler::from_seed(5);
    let bits = sampler.run_sequence(PI / 310.0, 30).unwrap();
    assert_eq!(bits.len(), 30);
    assert!(bits.iter().all(|&bit| bit <= 1));
}

#[test]
fn quarter_turn_always_excites() {
    // sin²(π/2) = 1: the single accumulated read must come back excited.
    let mut sampler = LocalSampler::from_seed(13);
    for _ in 0..100 {
        assert_eq!(sampler.run_single(FRAC_PI_2).unwrap(), 1);
    }
}

#[test]
fn quarter_turn_sequence_alternates() {
    // From ground the π/2 step always excites; from excited the hold
    // probability cos²(π/2) is zero, so the collapsed chain alternates.
    let mut sampler = LocalSampler::from_seed(13);
    let bits = sampler.run_sequence(FRAC_PI_2, 6).unwrap();
    assert_eq!(bits, vec![1, 0, 1, 0, 1, 0]);
}

#[test]
fn rejects_invalid_parameters() {
    let mut sampler = LocalSampler::from_seed(1);
    assert_eq!(
        sampler.run_single(0.0).unwrap_err().info().code,
        "bad-angle"
    );
    assert_eq!(
        sampler.run_single(f64::NAN).unwrap_err().info().code,
        "bad-angle"
    );
    assert_eq!(
        sampler.run_sequence(0.1, 0).unwrap_err().info().code,
        "zero-steps"
    );
}
