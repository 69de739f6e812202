//! High-level loading API: discover data files, decode them, merge.
//!
//! ```no_run
//! use resfork::archive::{load, load_with_options, ErrorPolicy, LoadOptions};
//!
//! // Everything under a data directory, fail on the first bad file.
//! let resources = load(&["Nova Files"])?;
//! let ship = resources.get("shïp", 128);
//!
//! // Best effort: skip unreadable files and report them.
//! let opts = LoadOptions { policy: ErrorPolicy::SkipInvalid, ..LoadOptions::default() };
//! let report = load_with_options(&["Nova Files", "Plug-ins"], &opts)?;
//! for skipped in &report.skipped {
//!     eprintln!("skipped: {skipped}");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::discovery::{find_data_files, DATA_FILE_EXTENSION};
use crate::error::LoadError;
use crate::index::ResourceIndex;
use crate::batch::decode_files;

// ── LoadOptions ───────────────────────────────────────────────────────────────

/// What to do when one of several data files cannot be read or decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Return the first failure in file order; nothing is merged.
    #[default]
    FailFast,
    /// Log and skip failing files, merge the rest.
    SkipInvalid,
}

/// Configuration for [`load_with_options`] and [`load_files`].
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// File extension to pick up during discovery, without the dot.
    pub extension: String,
    pub policy:    ErrorPolicy,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            extension: DATA_FILE_EXTENSION.to_owned(),
            policy:    ErrorPolicy::FailFast,
        }
    }
}

// ── LoadReport ────────────────────────────────────────────────────────────────

/// Outcome of an aggregate load.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Merged resources, bookkeeping types removed.
    pub resources: ResourceIndex,
    /// Files merged, in merge order.
    pub loaded:    Vec<PathBuf>,
    /// Files skipped under [`ErrorPolicy::SkipInvalid`].
    pub skipped:   Vec<LoadError>,
}

// ── Entry points ──────────────────────────────────────────────────────────────

/// Load and merge every data file under `paths` with default options.
pub fn load<P: AsRef<Path>>(paths: &[P]) -> Result<ResourceIndex, LoadError> {
    load_with_options(paths, &LoadOptions::default()).map(|r| r.resources)
}

/// Discover data files under `paths`, then [`load_files`] them.
pub fn load_with_options<P: AsRef<Path>>(paths: &[P], opts: &LoadOptions) -> Result<LoadReport, LoadError> {
    let files = find_data_files(paths, &opts.extension)?;
    info!(files = files.len(), "discovered data files");
    load_files(&files, opts)
}

/// Decode `files` and merge them in the given order.  Later files overwrite
/// earlier ones on (type, id); the checksum and signature types are dropped
/// from the result.
pub fn load_files(files: &[PathBuf], opts: &LoadOptions) -> Result<LoadReport, LoadError> {
    let mut report = LoadReport::default();

    for (path, result) in decode_files(files, opts.policy) {
        match result {
            Ok(index) => {
                report.resources.merge(index);
                report.loaded.push(path);
            }
            Err(e) => match opts.policy {
                ErrorPolicy::FailFast => return Err(e),
                ErrorPolicy::SkipInvalid => {
                    warn!(path = %path.display(), error = %e, "skipping data file");
                    report.skipped.push(e);
                }
            },
        }
    }

    report.resources.remove_bookkeeping();
    info!(
        loaded = report.loaded.len(),
        skipped = report.skipped.len(),
        resources = report.resources.len(),
        "merged data files"
    );
    Ok(report)
}
