//! Result series: the recorded training curve of one run.

use serde::{Deserialize, Serialize};

/// Two index-aligned sequences: cumulative frame counts and the best reward
/// recorded at each checkpoint. Always equal length; frames are expected to
/// be non-negative and non-decreasing as written by the training executable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSeries {
    pub frames: Vec<i64>,
    pub rewards: Vec<f64>,
}

impl ResultSeries {
    pub fn new(frames: Vec<i64>, rewards: Vec<f64>) -> Self {
        assert_eq!(
            frames.len(),
            rewards.len(),
            "frame and reward sequences must be index-aligned"
        );
        Self { frames, rewards }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Iterate `(frame, reward)` pairs.
    pub fn points(&self) -> impl Iterator<Item = (i64, f64)> + '_ {
        self.frames.iter().copied().zip(self.rewards.iter().copied())
    }
}
