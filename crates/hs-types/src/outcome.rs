//! Run outcomes reported by the process orchestrator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The result of one launched training process. Produced exactly once per
/// identity and immutable afterward.
///
/// A failed launch is an outcome like any other: `exit_code` is `None` and
/// `error` explains why. Non-zero exits are recorded, never escalated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunOutcome {
    pub run_name: String,
    /// The exact argument vector the process was launched with.
    pub args: Vec<String>,
    /// `None` when the process never started or was killed by a signal.
    pub exit_code: Option<i32>,
    pub error: Option<String>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunOutcome {
    pub fn succeeded(&self) -> bool {
        self.exit_code == Some(0)
    }

    pub fn duration_seconds(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_requires_zero_exit() {
        let outcome = RunOutcome {
            run_name: "run".to_string(),
            args: vec!["-env=x".to_string()],
            exit_code: Some(0),
            error: None,
            started_at: Utc::now(),
            finished_at: Utc::now(),
        };
        assert!(outcome.succeeded());

        let failed = RunOutcome {
            exit_code: Some(1),
            ..outcome.clone()
        };
        assert!(!failed.succeeded());

        let never_started = RunOutcome {
            exit_code: None,
            error: Some("No such file or directory".to_string()),
            ..outcome
        };
        assert!(!never_started.succeeded());
    }
}
