//! Result location, series processing, and comparison plotting for
//! HyperSweep.
//!
//! Provides:
//! - Metadata-driven discovery of a run's results file ([`find_results_csv`])
//! - Results loading, Gaussian smoothing, and area-under-curve
//!   ([`load_results_csv`], [`smooth`], [`area_under_curve`])
//! - Comparison-chart assembly, one curve per swept value ([`ComparisonPlot`])

mod locate;
mod plot;
mod series;

pub use locate::{find_results_csv, load_metadata, METADATA_FILE, RESULTS_FILE};
pub use plot::{legend_label, ComparisonPlot};
pub use series::{area_under_curve, load_results_csv, smooth};
