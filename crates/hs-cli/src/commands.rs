//! Subcommand definitions and handlers.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Subcommand};

use crossbeam_channel::unbounded;
use hs_analysis::ComparisonPlot;
use hs_sweep::{expand_identities, validate_overrides, ProcessRunner, RunnerConfig};
use hs_types::{ExperimentIdentity, OverrideSet, ParamValue, RunOutcome, SweepGrid};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Launch one training run per grid value of the optimized hyperparameter
    Sweep(SweepArgs),
    /// Plot recorded results, one curve per grid value of the optimized hyperparameter
    Plot(PlotArgs),
}

/// The sweep description shared by both subcommands.
#[derive(Args, Debug)]
pub struct GridSelection {
    /// Which task/environment to use
    #[arg(long)]
    pub env: String,

    /// Which hyperparameter to optimize
    #[arg(long)]
    pub optimize: String,

    /// Value of theta to use; required iff theta is positioned before the optimized one
    #[arg(long)]
    pub set_theta: Option<f64>,

    /// Value of frac to use; required iff frac is positioned before the optimized one
    #[arg(long)]
    pub set_frac: Option<f64>,

    /// Value of time_steps to use; required iff time_steps is positioned before the optimized one
    #[arg(long)]
    pub set_time_steps: Option<i64>,

    /// Value of K to use; required iff K is positioned before the optimized one
    #[arg(long)]
    pub set_k: Option<i64>,

    /// Training seed; recorded in run metadata and matched when plotting
    #[arg(long)]
    pub seed: Option<i64>,

    /// Root directory the training executable writes run folders into
    #[arg(long, default_value = "./logs")]
    pub logdir: PathBuf,
}

impl GridSelection {
    fn overrides(&self) -> OverrideSet {
        let mut overrides = OverrideSet::new();
        if let Some(theta) = self.set_theta {
            overrides.insert("theta", ParamValue::Float(theta));
        }
        if let Some(frac) = self.set_frac {
            overrides.insert("frac", ParamValue::Float(frac));
        }
        if let Some(time_steps) = self.set_time_steps {
            overrides.insert("time_steps", ParamValue::Int(time_steps));
        }
        if let Some(k) = self.set_k {
            overrides.insert("K", ParamValue::Int(k));
        }
        overrides
    }

    /// Validate the override pattern and expand the sweep. Fails before
    /// anything is launched.
    fn identities(&self, grid: &SweepGrid) -> anyhow::Result<Vec<ExperimentIdentity>> {
        let overrides = self.overrides();
        validate_overrides(grid, &self.optimize, &overrides)?;
        let identities =
            expand_identities(grid, &self.optimize, &overrides, &self.env, self.seed)?;
        Ok(identities)
    }
}

#[derive(Args, Debug)]
pub struct SweepArgs {
    #[command(flatten)]
    pub selection: GridSelection,

    /// Path to the training executable
    #[arg(long, default_value = "./run_re2")]
    pub exec: PathBuf,

    /// Number of CPUs to use per training process
    #[arg(long, default_value_t = 1)]
    pub num_cpu: u32,

    /// Number of training processes to run concurrently
    #[arg(long, default_value_t = 1)]
    pub max_processes: usize,
}

#[derive(Args, Debug)]
pub struct PlotArgs {
    #[command(flatten)]
    pub selection: GridSelection,

    /// Gaussian smoothing width in frames; omit to plot raw curves
    #[arg(long)]
    pub sigma: Option<f64>,

    /// Output image path
    #[arg(long, default_value = "comparison.png")]
    pub out: PathBuf,
}

pub fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Sweep(args) => run_sweep(args),
        Commands::Plot(args) => run_plot(args),
    }
}

/// The fixed experiment grid. Constructed per call so other grids can be
/// used side by side; axis order is the override-validation order.
pub fn hyperparameter_grid() -> SweepGrid {
    SweepGrid::new()
        .axis_floats("theta", &[0.3, 0.5, 0.7, 0.8])
        .axis_floats("frac", &[0.2, 0.5, 0.7, 1.0])
        .axis_ints("time_steps", &[50, 200])
        .axis_ints("K", &[1, 3])
}

/// Fixed algorithm flags passed to every training run. When no explicit
/// seed is given the default seed flag is still sent; an explicit seed
/// travels on the identity instead and is serialized with its fields.
fn fixed_training_args(num_cpu: u32, seed: Option<i64>) -> Vec<String> {
    let mut args: Vec<String> = [
        "-disable_cuda",
        "-OFF_TYPE=1",
        "-pr=64",
        "-pop_size=5",
        "-prob_reset_and_sup=0.05",
        "-gamma=0.99",
        "-TD3_noise=0.2",
        "-EA",
        "-RL",
        "-state_alpha=0.0",
        "-actor_alpha=1.0",
        "-EA_actor_alpha=1.0",
        "-tau=0.005",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    if seed.is_none() {
        args.push("-seed=1".to_string());
    }
    args.push(format!("-cpu_num={num_cpu}"));
    args
}

/// One status line per completed run.
fn completion_line(outcome: &RunOutcome) -> String {
    match (outcome.exit_code, &outcome.error) {
        (Some(0), _) => format!(
            "{} finished ok in {}s",
            outcome.run_name,
            outcome.duration_seconds()
        ),
        (Some(code), _) => format!("{} finished with exit code {code}", outcome.run_name),
        (None, Some(error)) => format!("{} failed to run: {error}", outcome.run_name),
        (None, None) => format!("{} ended without an exit status", outcome.run_name),
    }
}

fn run_sweep(args: SweepArgs) -> anyhow::Result<()> {
    let grid = hyperparameter_grid();
    let identities = args.selection.identities(&grid)?;

    let (progress_tx, progress_rx) = unbounded();
    let runner = ProcessRunner::new(RunnerConfig {
        executable: args.exec,
        fixed_args: fixed_training_args(args.num_cpu, args.selection.seed),
        log_root: args.selection.logdir.clone(),
        max_concurrency: args.max_processes,
    })
    .with_progress(progress_tx);

    // Status lines print as runs complete, not after the whole batch.
    let reporter = std::thread::spawn(move || {
        for outcome in progress_rx.iter() {
            println!("{}", completion_line(&outcome));
        }
    });

    let outcomes = runner.run_all(&identities);
    // Dropping the runner closes the progress channel and ends the reporter.
    drop(runner);
    reporter
        .join()
        .map_err(|_| anyhow::anyhow!("progress reporter thread panicked"))?;

    let failed = outcomes.iter().filter(|o| !o.succeeded()).count();
    println!("{} runs finished, {} failed", outcomes.len(), failed);
    Ok(())
}

/// Legend bases: one `name=value` per swept grid value, in sweep order.
fn curve_labels(grid: &SweepGrid, optimized: &str) -> Vec<String> {
    grid.axis(optimized)
        .map(|axis| {
            axis.values
                .iter()
                .map(|value| format!("{optimized}={value}"))
                .collect()
        })
        .unwrap_or_default()
}

fn run_plot(args: PlotArgs) -> anyhow::Result<()> {
    let grid = hyperparameter_grid();
    let identities = args.selection.identities(&grid)?;
    let labels = curve_labels(&grid, &args.selection.optimize);
    let runs: Vec<(ExperimentIdentity, String)> =
        identities.into_iter().zip(labels).collect();

    let plot = ComparisonPlot::new(&args.out)
        .with_title(format!(
            "Performance comparison for different {} values",
            args.selection.optimize
        ))
        .with_sigma(args.sigma);
    plot.render(&args.selection.logdir, &runs)
        .context("rendering comparison plot")?;

    println!("Saved comparison plot to {}", args.out.display());
    Ok(())
}
