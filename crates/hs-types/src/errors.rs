use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used throughout the workspace.
pub type SweepResult<T> = Result<T, SweepError>;

/// Main error type for the HyperSweep system.
///
/// Per-run process failures are deliberately *not* represented here: a child
/// that fails to launch or exits non-zero is reported as an ordinary
/// [`crate::RunOutcome`] so that sibling runs keep going.
#[derive(Error, Debug)]
pub enum SweepError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unknown grid parameter: {name}")]
    UnknownParameter { name: String },

    #[error("No results found for run: {identity}")]
    NotFound { identity: String },

    #[error("Parse error in {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Metadata error in {path}: {message}")]
    Metadata { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Plot error: {0}")]
    Plot(String),
}
