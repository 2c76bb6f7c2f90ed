//! Re-finding a run's output directory by metadata content.
//!
//! Runs are located by what their metadata says, not by directory name, so
//! renamed or hand-moved run folders still resolve. Iteration order is
//! whatever the OS returns; trees with more than one matching directory are
//! a caller error and the first match wins.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use hs_types::{ExperimentIdentity, MetadataRecord, SweepError, SweepResult};

/// Metadata document each run directory carries.
pub const METADATA_FILE: &str = "info.txt";
/// Results time series each run directory carries.
pub const RESULTS_FILE: &str = "results.csv";

/// Read and parse the metadata record of one run directory.
pub fn load_metadata(run_dir: &Path) -> SweepResult<MetadataRecord> {
    let path = run_dir.join(METADATA_FILE);
    let raw = fs::read_to_string(&path)?;
    MetadataRecord::from_json(&raw).map_err(|err| SweepError::Metadata {
        path,
        message: err.to_string(),
    })
}

/// Scan the immediate subdirectories of `search_root` for the run matching
/// `identity` and return the path of its results file.
///
/// Directories whose metadata is missing or unparseable are skipped with a
/// warning; fails with `NotFound` when the full scan produces no match. No
/// caching, no mutation.
pub fn find_results_csv(
    search_root: &Path,
    identity: &ExperimentIdentity,
) -> SweepResult<PathBuf> {
    for entry in fs::read_dir(search_root)? {
        let dir = entry?.path();
        if !dir.is_dir() {
            continue;
        }
        let record = match load_metadata(&dir) {
            Ok(record) => record,
            Err(err) => {
                warn!(dir = %dir.display(), %err, "skipping run directory with unreadable metadata");
                continue;
            }
        };
        if record.matches_identity(identity) {
            return Ok(dir.join(RESULTS_FILE));
        }
    }
    Err(SweepError::NotFound {
        identity: identity.to_string(),
    })
}
