//! Comparison-chart assembly: one smoothed curve per swept value.

use std::path::{Path, PathBuf};

use plotters::prelude::*;
use tracing::info;

use hs_types::{ExperimentIdentity, ResultSeries, SweepError, SweepResult};

use crate::locate::find_results_csv;
use crate::series::{area_under_curve, load_results_csv, smooth};

/// Legend entry: the swept value plus the raw-series AUC summary.
pub fn legend_label(base: &str, auc: f64) -> String {
    format!("{base} (AUC {auc:.1})")
}

/// Configuration for one comparison chart.
#[derive(Debug, Clone)]
pub struct ComparisonPlot {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Fixed x-axis limit; `None` fits the data.
    pub x_max: Option<i64>,
    /// Gaussian smoothing width for display; `None` plots raw curves.
    pub sigma: Option<f64>,
    pub out_path: PathBuf,
}

impl ComparisonPlot {
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            title: "Performance comparison".to_string(),
            x_label: "Time Steps (1e6)".to_string(),
            y_label: "Undiscounted Return".to_string(),
            x_max: Some(1_000_000),
            sigma: None,
            out_path: out_path.into(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_sigma(mut self, sigma: Option<f64>) -> Self {
        self.sigma = sigma;
        self
    }

    pub fn with_x_max(mut self, x_max: Option<i64>) -> Self {
        self.x_max = x_max;
        self
    }

    /// Locate, load, and draw every run. AUC is computed on the raw series;
    /// smoothing only affects what is drawn. Any location or parse failure
    /// aborts the whole render before a single pixel is drawn.
    pub fn render(
        &self,
        search_root: &Path,
        runs: &[(ExperimentIdentity, String)],
    ) -> SweepResult<()> {
        if let Some(sigma) = self.sigma {
            if !(sigma.is_finite() && sigma > 0.0) {
                return Err(SweepError::Validation(format!(
                    "smoothing sigma must be a positive number, got {sigma}"
                )));
            }
        }

        let mut curves: Vec<(String, ResultSeries)> = Vec::with_capacity(runs.len());
        for (identity, label) in runs {
            let results_path = find_results_csv(search_root, identity)?;
            let raw = load_results_csv(&results_path)?;
            let auc = area_under_curve(&raw);
            curves.push((legend_label(label, auc), smooth(&raw, self.sigma)));
        }

        let (x_range, y_range) = self.axis_ranges(&curves);

        let root = BitMapBackend::new(&self.out_path, (1000, 600)).into_drawing_area();
        root.fill(&WHITE).map_err(plot_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(self.title.clone(), ("sans-serif", 24))
            .margin(10)
            .x_label_area_size(45)
            .y_label_area_size(60)
            .build_cartesian_2d(x_range, y_range)
            .map_err(plot_err)?;

        chart
            .configure_mesh()
            .x_desc(self.x_label.clone())
            .y_desc(self.y_label.clone())
            .draw()
            .map_err(plot_err)?;

        for (idx, (label, series)) in curves.iter().enumerate() {
            let color = Palette99::pick(idx).to_rgba();
            chart
                .draw_series(LineSeries::new(
                    series.points().map(|(frame, reward)| (frame as f64, reward)),
                    color.stroke_width(2),
                ))
                .map_err(plot_err)?
                .label(label.as_str())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });
        }

        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(plot_err)?;
        root.present().map_err(plot_err)?;

        info!(out = %self.out_path.display(), curves = curves.len(), "saved comparison plot");
        Ok(())
    }

    fn axis_ranges(
        &self,
        curves: &[(String, ResultSeries)],
    ) -> (std::ops::Range<f64>, std::ops::Range<f64>) {
        let data_x_max = curves
            .iter()
            .flat_map(|(_, s)| s.frames.iter().copied())
            .max()
            .unwrap_or(1);
        let x_max = self.x_max.unwrap_or(data_x_max).max(1) as f64;

        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        for (_, series) in curves {
            for reward in &series.rewards {
                y_min = y_min.min(*reward);
                y_max = y_max.max(*reward);
            }
        }
        if !y_min.is_finite() || !y_max.is_finite() {
            return (0.0..x_max, 0.0..1.0);
        }
        let pad = ((y_max - y_min) * 0.05).max(1.0);
        (0.0..x_max, (y_min - pad)..(y_max + pad))
    }
}

fn plot_err<E: std::fmt::Display>(err: E) -> SweepError {
    SweepError::Plot(err.to_string())
}
