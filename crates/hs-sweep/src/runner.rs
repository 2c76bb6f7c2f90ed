//! Bounded-concurrency process orchestration.
//!
//! Each identity becomes one child process of the external training
//! executable. A fixed pool of worker threads pulls identities from a shared
//! job channel; every worker blocks on exactly one child's termination, so
//! the only suspension point is "wait for process exit". Outcomes flow back
//! over a result channel in completion order, which is explicitly unrelated
//! to submission order. The top-level call joins the whole batch before
//! returning.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::thread;

use chrono::Utc;
use crossbeam_channel::{unbounded, Sender};
use tracing::{info, warn};

use hs_types::{ExperimentIdentity, RunOutcome};

/// Configuration for one batch of sweep runs.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Path to the external training executable.
    pub executable: PathBuf,
    /// Fixed algorithm flags prepended to every run's argument vector.
    pub fixed_args: Vec<String>,
    /// Root directory the executable writes run folders into.
    pub log_root: PathBuf,
    /// Maximum number of simultaneously running training processes.
    pub max_concurrency: usize,
}

/// Launches training processes and collects their outcomes.
///
/// A process that exits non-zero, or never starts, is reported as an
/// ordinary [`RunOutcome`]; nothing is retried or cancelled and sibling runs
/// are unaffected.
pub struct ProcessRunner {
    config: RunnerConfig,
    progress_tx: Option<Sender<RunOutcome>>,
}

impl ProcessRunner {
    pub fn new(config: RunnerConfig) -> Self {
        Self {
            config,
            progress_tx: None,
        }
    }

    /// Report each completion on `tx` as it happens, in addition to the
    /// final returned sequence.
    pub fn with_progress(mut self, tx: Sender<RunOutcome>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    /// The full argument vector for one identity: fixed flags, then one
    /// `-name=value` token per identity field, then the log-root flag.
    pub fn command_args(&self, identity: &ExperimentIdentity) -> Vec<String> {
        let mut args = self.config.fixed_args.clone();
        args.push(format!("-env={}", identity.env));
        for (name, value) in identity.fields() {
            args.push(format!("-{name}={value}"));
        }
        args.push(format!("-logdir={}", self.config.log_root.display()));
        args
    }

    /// Run every identity to completion and return all outcomes.
    ///
    /// Blocks the caller until the whole batch is done. The returned order
    /// is completion order, not submission order.
    pub fn run_all(&self, identities: &[ExperimentIdentity]) -> Vec<RunOutcome> {
        if identities.is_empty() {
            return Vec::new();
        }
        let workers = self.config.max_concurrency.max(1).min(identities.len());

        let (job_tx, job_rx) = unbounded::<(String, Vec<String>)>();
        let (done_tx, done_rx) = unbounded::<RunOutcome>();

        for identity in identities {
            job_tx
                .send((identity.run_name(), self.command_args(identity)))
                .expect("job channel closed during submission");
        }
        drop(job_tx);

        info!(
            runs = identities.len(),
            workers, "launching sweep batch"
        );

        thread::scope(|scope| {
            for _ in 0..workers {
                let job_rx = job_rx.clone();
                let done_tx = done_tx.clone();
                let executable = self.config.executable.clone();
                scope.spawn(move || {
                    for (run_name, args) in job_rx.iter() {
                        let outcome = launch_and_wait(&executable, run_name, args);
                        if done_tx.send(outcome).is_err() {
                            return;
                        }
                    }
                });
            }
            // Workers hold the remaining senders; the receive loop below ends
            // once they all finish.
            drop(done_tx);

            let mut outcomes = Vec::with_capacity(identities.len());
            for outcome in done_rx.iter() {
                match (outcome.exit_code, &outcome.error) {
                    (Some(0), _) => info!(run = %outcome.run_name, "run finished"),
                    (Some(code), _) => {
                        warn!(run = %outcome.run_name, code, "run exited non-zero")
                    }
                    (None, Some(error)) => {
                        warn!(run = %outcome.run_name, %error, "run failed to complete")
                    }
                    (None, None) => warn!(run = %outcome.run_name, "run ended without status"),
                }
                if let Some(tx) = &self.progress_tx {
                    let _ = tx.send(outcome.clone());
                }
                outcomes.push(outcome);
            }
            outcomes
        })
    }
}

/// Spawn one child and block until it exits. The child inherits stdout and
/// stderr; nothing is written to its stdin.
fn launch_and_wait(executable: &Path, run_name: String, args: Vec<String>) -> RunOutcome {
    let started_at = Utc::now();
    let waited = Command::new(executable)
        .args(&args)
        .spawn()
        .and_then(|mut child| child.wait());
    let finished_at = Utc::now();

    match waited {
        Ok(status) => RunOutcome {
            run_name,
            args,
            exit_code: status.code(),
            error: status
                .code()
                .is_none()
                .then(|| "terminated by signal".to_string()),
            started_at,
            finished_at,
        },
        Err(err) => RunOutcome {
            run_name,
            args,
            exit_code: None,
            error: Some(err.to_string()),
            started_at,
            finished_at,
        },
    }
}
