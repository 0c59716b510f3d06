use ifm_core::derive_substream_seed;

const PLACEMENT_STREAM: u64 = 0;
const SAMPLER_STREAM: u64 = 1;
const TARGET_DRAW_STREAM: u64 = 2;

/// Derives the deterministic seed used for target placement.
pub fn placement_seed(master_seed: u64) -> u64 {
    derive_substream_seed(master_seed, PLACEMENT_STREAM)
}

/// Derives the deterministic seed handed to the sampler backend.
pub fn sampler_seed(master_seed: u64) -> u64 {
    derive_substream_seed(master_seed, SAMPLER_STREAM)
}

/// Derives the seed for drawing a random target count when none was given.
pub fn target_draw_seed(master_seed: u64) -> u64 {
    derive_substream_seed(master_seed, TARGET_DRAW_STREAM)
}
