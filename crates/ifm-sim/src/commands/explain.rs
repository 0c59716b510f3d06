use std::error::Error;

use ifm_grid::{MAX_DIM, MIN_DIM};

pub fn run() -> Result<(), Box<dyn Error>> {
    println!(
        "ifm-sim surveys an N x N minefield by interaction-free probing: each\n\
         probe runs one of two observation procedures against a two-level\n\
         system, so empty cells can be confirmed clear while hidden targets\n\
         are usually located without ever being triggered.\n\
         \n\
         Parameters for `ifm-sim run`:\n\
         \n\
           --dim       board dimension ({MIN_DIM}-{MAX_DIM})\n\
           --targets   number of hidden targets (1 to dim^2; omit for random)\n\
           --backend   sampler backend: local | queued\n\
           --device    queued device name (registry lookup, local fallback)\n\
           --seed      master seed; all randomness derives from it\n\
           --angle     weak-rotation half-angle in radians\n\
           --steps     reads per observation cycle\n\
           --config    YAML run configuration (flags override it)\n\
           --out       directory for metrics, grids, and the run manifest\n\
         \n\
         Run without --dim and without --config to be prompted interactively."
    );
    Ok(())
}
