//! hypersweep — sweep one hyperparameter of an external training executable
//! across its grid, then compare the recorded results.

mod commands;

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// HyperSweep: grid sweeps and comparison plots for training runs.
#[derive(Parser, Debug)]
#[command(name = "hypersweep", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: commands::Commands,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so child-process stdout passes through untouched.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    commands::run(cli.command)
}
