use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use ifm_backend::{select_backend, BackendConfig, BackendSelection};
use ifm_core::RngHandle;
use ifm_grid::{render, MAX_DIM, MIN_DIM};
use ifm_scan::{determinism, finalize, RunConfig, Survey};

#[derive(Args, Debug)]
pub struct RunArgs {
    /// YAML run configuration; flags override its values.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Board dimension (3-10). Prompted for when omitted without --config.
    #[arg(long)]
    pub dim: Option<usize>,
    /// Number of hidden targets (1 to dim^2). Omit for a seeded random draw.
    #[arg(long)]
    pub targets: Option<usize>,
    /// Sampler backend.
    #[arg(long, value_enum)]
    pub backend: Option<BackendChoice>,
    /// Queued device name; implies `--backend queued`.
    #[arg(long)]
    pub device: Option<String>,
    /// Master seed overriding the configuration.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Weak-rotation half-angle in radians.
    #[arg(long)]
    pub angle: Option<f64>,
    /// Reads per observation cycle.
    #[arg(long)]
    pub steps: Option<u32>,
    /// Output directory for run artefacts.
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Suppress the progress bar.
    #[arg(long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendChoice {
    /// Always-available local emulator.
    Local,
    /// Queued device with transparent local fallback.
    Queued,
}

pub fn run(args: &RunArgs) -> Result<(), Box<dyn Error>> {
    let (config, backend) = resolve(args)?;
    let master_seed = config.seed_policy.master_seed;
    let (mut sampler, selection) =
        select_backend(&backend, determinism::sampler_seed(master_seed));
    match &selection {
        BackendSelection::Local => {}
        BackendSelection::Queued { device } => println!("Using queued device: {device}"),
        BackendSelection::FallbackLocal { device, reason } => {
            println!("Device {device} unavailable: {reason}");
            println!("Using local emulator.");
        }
    }

    let mut survey = Survey::new(&config)?;
    let cell_count = config.cell_count();
    let target_count = config.grid.target_count;
    while survey.step(sampler.as_mut())?.is_some() {
        if !args.quiet {
            let clears = survey.metrics().clear_confirmed();
            print!(
                "\r{}{}",
                "#".repeat(clears),
                ".".repeat(cell_count - target_count - clears)
            );
            io::stdout().flush()?;
        }
    }
    if !args.quiet {
        println!();
    }

    let summary = finalize(&config, survey)?;
    println!("\nTarget grid:");
    print!("{}", render::render_targets(&summary.targets));
    println!("\nResult grid:");
    print!("{}", render::render_results(&summary.results));
    println!("\nTargets hit: {}.", summary.metrics.targets_hit());
    println!("Targets located: {}.", summary.targets_located());
    println!("Probe executions: {}.", summary.metrics.probes_executed());
    println!("Sweeps completed: {}.", summary.sweeps_completed);
    if let Some(path) = &summary.manifest_path {
        println!("Run manifest: {}.", path.display());
    }
    Ok(())
}

fn resolve(args: &RunArgs) -> Result<(RunConfig, BackendConfig), Box<dyn Error>> {
    let file_config = match &args.config {
        Some(path) => Some(RunConfig::load(path)?),
        None => None,
    };
    let had_file = file_config.is_some();
    let interactive = args.dim.is_none() && !had_file;

    let dim = match args.dim.or(file_config.as_ref().map(|c| c.grid.dim)) {
        Some(dim) => dim,
        None => prompt_dim()?,
    };
    let cell_count = dim * dim;

    let mut config = file_config.unwrap_or_else(|| RunConfig::new(dim, 1));
    config.grid.dim = dim;
    if let Some(seed) = args.seed {
        config.seed_policy.master_seed = seed;
    }
    if let Some(angle) = args.angle {
        config.probe.angle = angle;
    }
    if let Some(steps) = args.steps {
        config.probe.steps = steps;
    }
    if let Some(out) = &args.out {
        config.output.run_directory = Some(out.clone());
    }

    config.grid.target_count = match args.targets {
        Some(count) => count,
        None if interactive => prompt_targets(cell_count)?
            .unwrap_or_else(|| random_targets(cell_count, config.seed_policy.master_seed)),
        None if had_file => config.grid.target_count,
        None => random_targets(cell_count, config.seed_policy.master_seed),
    };
    config.validate()?;

    let backend = if args.device.is_some() || args.backend == Some(BackendChoice::Queued) {
        BackendConfig::Queued {
            device: args.device.clone(),
        }
    } else if args.backend == Some(BackendChoice::Local) {
        BackendConfig::Local
    } else if interactive {
        prompt_backend()?
    } else {
        BackendConfig::Local
    };

    Ok((config, backend))
}

fn random_targets(cell_count: usize, master_seed: u64) -> usize {
    let mut rng = RngHandle::from_seed(determinism::target_draw_seed(master_seed));
    1 + rng.draw_index(cell_count)
}

fn prompt_dim() -> Result<usize, Box<dyn Error>> {
    loop {
        let reply = ask(&format!("Board dimension ({MIN_DIM}-{MAX_DIM}): "))?;
        match reply.trim().parse::<usize>() {
            Ok(dim) if (MIN_DIM..=MAX_DIM).contains(&dim) => return Ok(dim),
            _ => println!("Invalid input, retry."),
        }
    }
}

fn prompt_targets(cell_count: usize) -> Result<Option<usize>, Box<dyn Error>> {
    loop {
        let reply = ask(&format!("Target count (1-{cell_count}), blank for random: "))?;
        match parse_target_reply(reply.trim(), cell_count) {
            Ok(choice) => return Ok(choice),
            Err(()) => println!("Invalid input, retry."),
        }
    }
}

fn prompt_backend() -> Result<BackendConfig, Box<dyn Error>> {
    loop {
        let reply = ask("Local emulator? (Y/N, blank=yes): ")?;
        match parse_backend_reply(reply.trim()) {
            Ok(backend) => return Ok(backend),
            Err(()) => println!("Invalid input, retry."),
        }
    }
}

fn parse_target_reply(reply: &str, cell_count: usize) -> Result<Option<usize>, ()> {
    if reply.is_empty() {
        return Ok(None);
    }
    match reply.parse::<usize>() {
        Ok(count) if (1..=cell_count).contains(&count) => Ok(Some(count)),
        _ => Err(()),
    }
}

fn parse_backend_reply(reply: &str) -> Result<BackendConfig, ()> {
    match reply.to_lowercase().as_str() {
        "" | "y" => Ok(BackendConfig::Local),
        "n" => Ok(BackendConfig::Queued { device: None }),
        _ => Err(()),
    }
}

fn ask(prompt: &str) -> Result<String, Box<dyn Error>> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut reply = String::new();
    io::stdin().read_line(&mut reply)?;
    Ok(reply)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_target_reply_means_random() {
        assert_eq!(parse_target_reply("", 9), Ok(None));
    }

    #[test]
    fn target_reply_is_range_checked() {
        assert_eq!(parse_target_reply("9", 9), Ok(Some(9)));
        assert_eq!(parse_target_reply("1", 9), Ok(Some(1)));
        assert_eq!(parse_target_reply("0", 9), Err(()));
        assert_eq!(parse_target_reply("10", 9), Err(()));
        assert_eq!(parse_target_reply("abc", 9), Err(()));
    }

    #[test]
    fn backend_reply_defaults_to_local() {
        assert_eq!(parse_backend_reply(""), Ok(BackendConfig::Local));
        assert_eq!(parse_backend_reply("Y"), Ok(BackendConfig::Local));
        assert_eq!(
            parse_backend_reply("n"),
            Ok(BackendConfig::Queued { device: None })
        );
        assert_eq!(parse_backend_reply("maybe"), Err(()));
    }

    #[test]
    fn random_target_draw_is_seeded_and_in_range() {
        let first = random_targets(25, 42);
        let second = random_targets(25, 42);
        assert_eq!(first, second);
        assert!((1..=25).contains(&first));
    }
}
