//! Core types and data structures for HyperSweep.
//!
//! Provides:
//! - The sweep grid (ordered axes of candidate hyperparameter values)
//! - Experiment identities and override sets
//! - Run outcomes produced by the process orchestrator
//! - Metadata records written by the training executable
//! - Result series (frame count vs. best reward)
//! - The shared error taxonomy

pub mod errors;
pub mod grid;
pub mod identity;
pub mod metadata;
pub mod outcome;
pub mod series;

pub use errors::{SweepError, SweepResult};
pub use grid::{GridAxis, ParamValue, SweepGrid};
pub use identity::{ExperimentIdentity, OverrideSet};
pub use metadata::MetadataRecord;
pub use outcome::RunOutcome;
pub use series::ResultSeries;
