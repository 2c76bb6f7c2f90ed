//! Results-file loading, Gaussian smoothing, and area-under-curve.

use std::path::Path;

use hs_types::{ResultSeries, SweepError, SweepResult};

const FRAMES_COLUMN: &str = "num_frames";
const REWARD_COLUMN: &str = "best_reward";

/// Load a run's results file: header-identified `num_frames` and
/// `best_reward` columns, one row per recorded checkpoint.
///
/// Fails with a parse error on a missing column or a non-numeric value; rows
/// are never silently dropped.
pub fn load_results_csv(path: &Path) -> SweepResult<ResultSeries> {
    let parse_err = |message: String| SweepError::Parse {
        path: path.to_path_buf(),
        message,
    };

    let mut reader = csv::Reader::from_path(path).map_err(|e| parse_err(e.to_string()))?;
    let headers = reader
        .headers()
        .map_err(|e| parse_err(e.to_string()))?
        .clone();
    let frames_col = headers
        .iter()
        .position(|h| h == FRAMES_COLUMN)
        .ok_or_else(|| parse_err(format!("missing column {FRAMES_COLUMN}")))?;
    let reward_col = headers
        .iter()
        .position(|h| h == REWARD_COLUMN)
        .ok_or_else(|| parse_err(format!("missing column {REWARD_COLUMN}")))?;

    let mut frames = Vec::new();
    let mut rewards = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(|e| parse_err(e.to_string()))?;
        let frame_field = record
            .get(frames_col)
            .ok_or_else(|| parse_err(format!("row {row} is missing {FRAMES_COLUMN}")))?;
        let reward_field = record
            .get(reward_col)
            .ok_or_else(|| parse_err(format!("row {row} is missing {REWARD_COLUMN}")))?;

        frames.push(frame_field.trim().parse::<i64>().map_err(|_| {
            parse_err(format!(
                "non-numeric {FRAMES_COLUMN} value {frame_field:?} at row {row}"
            ))
        })?);
        rewards.push(reward_field.trim().parse::<f64>().map_err(|_| {
            parse_err(format!(
                "non-numeric {REWARD_COLUMN} value {reward_field:?} at row {row}"
            ))
        })?);
    }

    Ok(ResultSeries::new(frames, rewards))
}

/// Gaussian-kernel smoothing over the entire series.
///
/// `None` is the identity operation. Otherwise every output point is the
/// weighted average of *all* rewards, with weight
/// `exp(-0.5 * ((frame[i] - frame[j]) / sigma)^2)` — temporally-near samples
/// dominate. O(n^2) in series length; runs once per plotted series, not in a
/// hot loop.
pub fn smooth(series: &ResultSeries, sigma: Option<f64>) -> ResultSeries {
    let Some(sigma) = sigma else {
        return series.clone();
    };
    // The kernel is undefined for sigma <= 0; its 0+ limit is the identity.
    if !(sigma.is_finite() && sigma > 0.0) {
        return series.clone();
    }

    let n = series.len();
    let mut rewards = Vec::with_capacity(n);
    for i in 0..n {
        let mut numerator = 0.0;
        let mut total_weight = 0.0;
        for j in 0..n {
            let distance = (series.frames[i] - series.frames[j]) as f64 / sigma;
            let weight = (-0.5 * distance * distance).exp();
            numerator += weight * series.rewards[j];
            total_weight += weight;
        }
        // total_weight >= 1 because j == i always contributes weight 1.
        rewards.push(numerator / total_weight);
    }

    ResultSeries::new(series.frames.clone(), rewards)
}

/// Trapezoidal integral of reward over frame count.
///
/// Always computed on the raw series, independent of any smoothing applied
/// for display.
pub fn area_under_curve(series: &ResultSeries) -> f64 {
    series
        .frames
        .windows(2)
        .zip(series.rewards.windows(2))
        .map(|(f, r)| (f[1] - f[0]) as f64 * (r[0] + r[1]) / 2.0)
        .sum()
}
