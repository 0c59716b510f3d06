use std::process;

use clap::{Parser, Subcommand};

use commands::run::RunArgs;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "ifm-sim", about = "Interaction-free minefield survey CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Execute a survey run; prompts for missing parameters.
    Run(RunArgs),
    /// Explain the survey parameters and exit.
    Explain,
}

fn main() {
    let cli = Cli::parse();
    let outcome = match cli.command {
        Command::Run(args) => commands::run::run(&args),
        Command::Explain => commands::explain::run(),
    };
    if let Err(err) = outcome {
        eprintln!("error: {err}");
        process::exit(1);
    }
}
